//! Type confusion: treating one union payload as another.
//!
//! The classic snippet stores a greeting pointer in a union, tags it as a
//! new user, then, through a copy-pasted condition, increments the union
//! as if it held a visit count. With [`UserRecord`] the increment is not
//! even expressible on a greeting; the closest a miscoded branch can get is
//! asking the tag-checked accessor for the counter, which refuses.

use faultline_core::{Console, Containment, Demo, DemoError, ViolationClass};
use tracing::info;

use crate::config::DemoConfig;
use crate::record::{UserKind, UserRecord, Visit};
use crate::report;

/// The type-confusion demo.
///
/// Safe path: build one record of each variant and visit both. Only the
/// new user's branch produces output: the greeting.
pub struct TypeConfusionDemo {
    greeting: String,
}

impl TypeConfusionDemo {
    /// Demo greeting new users with `config.record_greeting()`.
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            greeting: config.record_greeting(),
        }
    }
}

impl Demo for TypeConfusionDemo {
    fn class(&self) -> ViolationClass {
        ViolationClass::TypeConfusion
    }

    fn run(&self, console: &mut dyn Console) -> Result<(), DemoError> {
        let mut records = [
            UserRecord::new_user(self.greeting.as_str()),
            UserRecord::current_user(0),
        ];
        for record in &mut records {
            match record.visit() {
                Visit::Greet(greeting) => console.line(greeting.text()),
                Visit::Counted(count) => info!(visits = count.get(), "returning user counted"),
            }
        }
        Ok(())
    }

    fn attempt(&self, console: &mut dyn Console) -> Result<Vec<Containment>, DemoError> {
        let class = self.class();
        let mut contained = vec![
            report::compile_time(class, console, "Greeting", "E0599"),
            report::compile_time(class, console, "UserRecord", "E0004"),
        ];

        let mut record = UserRecord::new_user(self.greeting.as_str());
        let original = record.clone();

        // Wrong tag in the condition: this should have been CurrentUser.
        if record.kind() == UserKind::NewUser {
            let err = report::expect_fault(
                class,
                record.visit_count_mut().map(|count| count.increment()),
                "greeting incremented as a visit count",
            )?;
            contained.push(report::caught(class, console, err));
        }

        if record != original {
            return Err(DemoError::Uncontained {
                class,
                detail: "record changed by a rejected access".into(),
            });
        }
        if let Visit::Greet(greeting) = record.visit() {
            console.line(greeting.text());
        }
        Ok(contained)
    }
}
