use crate::locator::locator_model::LocatorRecord;
use crate::locator::naming::{IdentifierAllocator, java_string_literal};
use crate::pom::error::GenerationError;
use crate::pom::java_writer::{DRIVER_FIELD, JavaClassWriter, method};
use crate::pom::pom_model::{ClassSpec, GeneratedClass};
use crate::pom::synthesizer::{ClassSynthesizer, mentions_error_toast};

const IMPORTS: &[&str] = &[
    "io.appium.java_client.AppiumDriver",
    "io.appium.java_client.MobileBy",
    "org.openqa.selenium.By",
];

/// Returned on iOS when the element has no iOS locator.
pub const IOS_FALLBACK_XPATH: &str = "//XCUIElementTypeAny";

/// Returned on Android when the element has no Android locator.
pub const ANDROID_FALLBACK_XPATH: &str = "//android.widget.*";

/// Method-style page object: no fields; each element gets a `By get<Label>()`
/// accessor that picks the locator from the driver's platform at run time.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicRuntimeSynthesizer;

impl DynamicRuntimeSynthesizer {
    fn accessor(label: &str, record: &LocatorRecord) -> Vec<String> {
        let ios = match &record.ios_locator {
            Some(id) => format!("return MobileBy.AccessibilityId({});", java_string_literal(id)),
            None => format!("return MobileBy.xpath({});", java_string_literal(IOS_FALLBACK_XPATH)),
        };
        let android = match &record.android_locator {
            Some(id) => format!("return MobileBy.id({});", java_string_literal(id)),
            None => format!(
                "return MobileBy.xpath({});",
                java_string_literal(ANDROID_FALLBACK_XPATH)
            ),
        };

        method(
            &format!("public By get{}()", label),
            &[
                "if (driver.getPlatformName().equalsIgnoreCase(\"iOS\")) {".to_string(),
                format!("\t{}", ios),
                "} else {".to_string(),
                format!("\t{}", android),
                "}".to_string(),
            ],
        )
    }
}

impl ClassSynthesizer for DynamicRuntimeSynthesizer {
    fn style(&self) -> &'static str {
        "dynamic-runtime"
    }

    fn synthesize(
        &self,
        records: &[LocatorRecord],
        spec: &ClassSpec,
    ) -> Result<GeneratedClass, GenerationError> {
        let mut writer = JavaClassWriter::new(spec, IMPORTS).keep_driver();
        let mut names = IdentifierAllocator::new().reserving(DRIVER_FIELD);
        let mut error_toast = None;

        for record in records {
            let Some(ids) = names.allocate(&record.raw_name) else {
                continue;
            };
            let l = &ids.label;
            let element = format!("driver.findElement(get{}())", l);

            writer.add_method(&format!("get{}", l), Self::accessor(l, record));
            writer.add_method(
                &format!("tap{}", l),
                method(&format!("public void tap{}()", l), &[format!("{}.click();", element)]),
            );
            writer.add_method(
                &format!("enter{}", l),
                method(
                    &format!("public void enter{}(String input)", l),
                    &[format!("{}.sendKeys(input);", element)],
                ),
            );
            writer.add_method(
                &format!("is{}Visible", l),
                method(
                    &format!("public boolean is{}Visible()", l),
                    &[format!("return {}.isDisplayed();", element)],
                ),
            );

            if error_toast.is_none() && mentions_error_toast(&ids.field) {
                error_toast = Some(element);
            }
        }

        // Added after every record's own methods, so a record labelled
        // `ErrorToast` keeps its `isErrorToastVisible()`.
        if let Some(element) = error_toast {
            writer.add_method(
                "isErrorToastVisible",
                method(
                    "public boolean isErrorToastVisible()",
                    &[format!("return {}.isDisplayed();", element)],
                ),
            );
        }

        Ok(writer.finish())
    }
}
