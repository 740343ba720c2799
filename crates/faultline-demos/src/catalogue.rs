//! The ordered registry of demos.

use faultline_core::{Console, Containment, Demo, DemoError, ViolationClass};
use indexmap::IndexMap;
use tracing::{info, info_span};

use crate::config::{DemoConfig, DemoConfigError};
use crate::scope::ScopeDemo;
use crate::spatial::SpatialDemo;
use crate::temporal::TemporalDemo;
use crate::type_confusion::TypeConfusionDemo;

/// Demos keyed by class, iterated in registration order.
#[derive(Default)]
pub struct Catalogue {
    demos: IndexMap<ViolationClass, Box<dyn Demo>>,
}

/// The outcome of executing one demo.
#[derive(Debug, PartialEq, Eq)]
pub struct CatalogueRun {
    /// Which demo ran.
    pub class: ViolationClass,
    /// Containments from the attempt, empty if no attempt was made.
    pub result: Result<Vec<Containment>, DemoError>,
}

impl CatalogueRun {
    /// Exit status for this run.
    pub fn exit_code(&self) -> u8 {
        match &self.result {
            Ok(contained) => Containment::exit_code(contained),
            Err(err) => err.exit_code(),
        }
    }
}

impl Catalogue {
    /// An empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// All four demos over a validated `config`, in class order.
    pub fn standard(config: &DemoConfig) -> Result<Self, DemoConfigError> {
        config.validate()?;
        let mut catalogue = Self::new();
        catalogue.register(Box::new(ScopeDemo::new(config.scoped_value)));
        catalogue.register(Box::new(SpatialDemo::new(config.clone())));
        catalogue.register(Box::new(TemporalDemo::new(config.clone())));
        catalogue.register(Box::new(TypeConfusionDemo::new(config)));
        Ok(catalogue)
    }

    /// Add `demo`, returning any demo it replaces for the same class.
    ///
    /// A replacement keeps the original's position.
    pub fn register(&mut self, demo: Box<dyn Demo>) -> Option<Box<dyn Demo>> {
        self.demos.insert(demo.class(), demo)
    }

    /// The demo for `class`.
    pub fn get(&self, class: ViolationClass) -> Option<&dyn Demo> {
        self.demos.get(&class).map(|demo| demo.as_ref())
    }

    /// Registered classes, in order.
    pub fn classes(&self) -> impl Iterator<Item = ViolationClass> + '_ {
        self.demos.keys().copied()
    }

    /// Number of registered demos.
    pub fn len(&self) -> usize {
        self.demos.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.demos.is_empty()
    }

    /// Run one demo's safe path, then its attempt if `attempt` is set.
    ///
    /// Returns `None` if `class` is not registered.
    pub fn execute(
        &self,
        class: ViolationClass,
        console: &mut dyn Console,
        attempt: bool,
    ) -> Option<CatalogueRun> {
        let demo = self.get(class)?;
        let _span = info_span!("demo", %class).entered();
        let result = demo.run(console).and_then(|()| {
            if attempt {
                demo.attempt(console)
            } else {
                Ok(Vec::new())
            }
        });
        match &result {
            Ok(contained) => info!(contained = contained.len(), "demo finished"),
            Err(err) => info!(error = %err, "demo failed"),
        }
        Some(CatalogueRun { class, result })
    }

    /// Execute every demo in order.
    pub fn execute_all(&self, console: &mut dyn Console, attempt: bool) -> Vec<CatalogueRun> {
        self.classes()
            .filter_map(|class| self.execute(class, console, attempt))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faultline_core::ViolationError;
    use faultline_test_utils::fixtures::{FailingDemo, LeakyDemo, StaticOnlyDemo};
    use faultline_test_utils::CapturedConsole;

    #[test]
    fn standard_registers_all_classes_in_order() {
        let catalogue = Catalogue::standard(&DemoConfig::default()).unwrap();
        assert_eq!(catalogue.len(), 4);
        assert_eq!(
            catalogue.classes().collect::<Vec<_>>(),
            ViolationClass::ALL
        );
    }

    #[test]
    fn standard_rejects_invalid_config() {
        let config = DemoConfig {
            overflow_index: 0,
            ..DemoConfig::default()
        };
        assert!(matches!(
            Catalogue::standard(&config),
            Err(DemoConfigError::OverflowIndexInBounds { .. })
        ));
    }

    #[test]
    fn safe_run_has_no_containments() {
        let catalogue = Catalogue::standard(&DemoConfig::default()).unwrap();
        let mut console = CapturedConsole::new();
        let run = catalogue
            .execute(ViolationClass::Spatial, &mut console, false)
            .unwrap();
        assert_eq!(run.result, Ok(Vec::new()));
        assert_eq!(run.exit_code(), 0);
        assert_eq!(console.lines(), ["Hello"]);
    }

    #[test]
    fn register_replaces_in_place() {
        let mut catalogue = Catalogue::standard(&DemoConfig::default()).unwrap();
        let old = catalogue.register(Box::new(LeakyDemo::new(ViolationClass::Spatial, "leak")));
        assert!(old.is_some());
        assert_eq!(
            catalogue.classes().collect::<Vec<_>>(),
            ViolationClass::ALL
        );
        let mut console = CapturedConsole::new();
        let run = catalogue
            .execute(ViolationClass::Spatial, &mut console, true)
            .unwrap();
        assert_eq!(run.exit_code(), 70);
    }

    #[test]
    fn failing_safe_path_skips_attempt() {
        let mut catalogue = Catalogue::new();
        catalogue.register(Box::new(FailingDemo::new(
            ViolationClass::Temporal,
            ViolationError::AllocationFailure { requested: 6 },
        )));
        let mut console = CapturedConsole::new();
        let run = catalogue
            .execute(ViolationClass::Temporal, &mut console, true)
            .unwrap();
        assert_eq!(run.exit_code(), 2);
        assert!(catalogue
            .execute(ViolationClass::Scope, &mut console, true)
            .is_none());
    }

    #[test]
    fn compile_time_only_attempt_exits_one() {
        let mut catalogue = Catalogue::new();
        assert!(catalogue.is_empty());
        catalogue.register(Box::new(StaticOnlyDemo {
            class: ViolationClass::Scope,
        }));
        let mut console = CapturedConsole::new();
        let safe = catalogue
            .execute(ViolationClass::Scope, &mut console, false)
            .unwrap();
        assert_eq!(safe.exit_code(), 0);
        console.clear();
        let runs = catalogue.execute_all(&mut console, true);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].exit_code(), 1);
        assert!(console.lines().is_empty());
    }
}
