use crate::locator::locator_model::{LocatorRecord, Platform};
use crate::locator::naming::IdentifierAllocator;
use crate::pom::error::GenerationError;
use crate::pom::java_writer::JavaClassWriter;
use crate::pom::pom_model::{ClassSpec, GeneratedClass};
use crate::pom::synthesizer::{ClassSynthesizer, find_by_annotation};

const ANDROID_IMPORTS: &[&str] = &[
    "io.appium.java_client.AppiumDriver",
    "io.appium.java_client.pagefactory.AndroidFindBy",
    "io.appium.java_client.pagefactory.AppiumFieldDecorator",
    "org.openqa.selenium.WebElement",
    "org.openqa.selenium.support.PageFactory",
];

const IOS_IMPORTS: &[&str] = &[
    "io.appium.java_client.AppiumDriver",
    "io.appium.java_client.pagefactory.AppiumFieldDecorator",
    "io.appium.java_client.pagefactory.iOSXCUITFindBy",
    "org.openqa.selenium.WebElement",
    "org.openqa.selenium.support.PageFactory",
];

/// Single-platform page object: one annotated `WebElement` field per record.
#[derive(Debug, Clone, Copy)]
pub struct FieldStyleSynthesizer {
    platform: Platform,
}

impl FieldStyleSynthesizer {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl ClassSynthesizer for FieldStyleSynthesizer {
    fn style(&self) -> &'static str {
        match self.platform {
            Platform::Android => "android-fields",
            Platform::Ios => "ios-fields",
        }
    }

    fn synthesize(
        &self,
        records: &[LocatorRecord],
        spec: &ClassSpec,
    ) -> Result<GeneratedClass, GenerationError> {
        let imports = match self.platform {
            Platform::Android => ANDROID_IMPORTS,
            Platform::Ios => IOS_IMPORTS,
        };
        let mut writer = JavaClassWriter::new(spec, imports).init_page_factory();
        let mut names = IdentifierAllocator::new();

        for record in records {
            // Records extracted for the other platform carry nothing to bind here.
            let Some(locator) = record.locator_for(self.platform) else {
                continue;
            };
            let Some(ids) = names.allocate(&record.raw_name) else {
                continue;
            };

            writer.add_field(vec![
                find_by_annotation(self.platform, locator),
                format!("private WebElement {};", ids.field),
            ]);
        }

        Ok(writer.finish())
    }
}
