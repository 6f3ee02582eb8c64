use crate::locator::locator_model::{LocatorRecord, Platform};
use crate::locator::naming::IdentifierAllocator;
use crate::pom::error::GenerationError;
use crate::pom::java_writer::{DRIVER_FIELD, JavaClassWriter, method};
use crate::pom::pom_model::{ClassSpec, GeneratedClass};
use crate::pom::synthesizer::{
    ClassSynthesizer, find_by_annotation, mentions_error_toast, mentions_login,
};

const IMPORTS: &[&str] = &[
    "io.appium.java_client.AppiumDriver",
    "io.appium.java_client.pagefactory.AndroidFindBy",
    "io.appium.java_client.pagefactory.AppiumFieldDecorator",
    "io.appium.java_client.pagefactory.iOSXCUITFindBy",
    "java.time.Duration",
    "org.openqa.selenium.WebDriver",
    "org.openqa.selenium.WebElement",
    "org.openqa.selenium.support.PageFactory",
    "org.openqa.selenium.support.ui.ExpectedConditions",
    "org.openqa.selenium.support.ui.WebDriverWait",
];

/// Seconds `waitFor<Label>()` waits for visibility.
pub const WAIT_TIMEOUT_SECS: u32 = 10;

/// Fields the compound `login(username, password)` method drives.
pub const LOGIN_FIELDS: [&str; 3] = ["username", "password", "loginBtn"];

/// Dual-platform page object: fields carry Android and iOS annotations side by
/// side, followed by click/enter/wait behavior methods for every field.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossPlatformSynthesizer;

impl ClassSynthesizer for CrossPlatformSynthesizer {
    fn style(&self) -> &'static str {
        "cross-platform"
    }

    fn synthesize(
        &self,
        records: &[LocatorRecord],
        spec: &ClassSpec,
    ) -> Result<GeneratedClass, GenerationError> {
        let mut writer = JavaClassWriter::new(spec, IMPORTS)
            .keep_driver()
            .init_page_factory();
        let mut names = IdentifierAllocator::new().reserving(DRIVER_FIELD);
        let mut fields = Vec::new();
        let mut methods = Vec::new();

        for record in records {
            let Some(ids) = names.allocate(&record.raw_name) else {
                continue;
            };

            let mut field = Vec::new();
            for platform in [Platform::Android, Platform::Ios] {
                if let Some(locator) = record.locator_for(platform) {
                    field.push(find_by_annotation(platform, locator));
                }
            }
            field.push(format!("private WebElement {};", ids.field));
            writer.add_field(field);

            let f = &ids.field;
            let l = &ids.label;
            methods.push((
                format!("click{}", l),
                method(&format!("public void click{}()", l), &[format!("{}.click();", f)]),
            ));
            methods.push((
                format!("enter{}", l),
                method(
                    &format!("public void enter{}(String input)", l),
                    &[format!("{}.sendKeys(input);", f)],
                ),
            ));
            methods.push((
                format!("waitFor{}", l),
                method(
                    &format!("public void waitFor{}(WebDriver driver)", l),
                    &[format!(
                        "new WebDriverWait(driver, Duration.ofSeconds({})).until(ExpectedConditions.visibilityOf({}));",
                        WAIT_TIMEOUT_SECS, f
                    )],
                ),
            ));

            if mentions_login(f) {
                methods.push((
                    "isLoginButtonVisible".to_string(),
                    method(
                        "public boolean isLoginButtonVisible()",
                        &[format!("return {}.isDisplayed();", f)],
                    ),
                ));
            }
            if mentions_error_toast(f) {
                methods.push((
                    "isErrorToastVisible".to_string(),
                    method(
                        "public boolean isErrorToastVisible()",
                        &[format!("return {}.isDisplayed();", f)],
                    ),
                ));
            }

            fields.push(ids.field);
        }

        if LOGIN_FIELDS.iter().all(|name| fields.iter().any(|f| f == name)) {
            methods.push((
                "login".to_string(),
                method(
                    "public void login(String username, String password)",
                    &[
                        "this.username.sendKeys(username);".to_string(),
                        "this.password.sendKeys(password);".to_string(),
                        "this.loginBtn.click();".to_string(),
                    ],
                ),
            ));
        }

        for (name, lines) in methods {
            writer.add_method(&name, lines);
        }

        Ok(writer.finish())
    }
}
