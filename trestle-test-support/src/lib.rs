//! Shared test utilities used across trestle crates.

pub mod tracing {
    //! Capture layer for asserting spans and events in tests.
    use std::collections::BTreeMap;
    use std::fmt;
    use std::sync::{Arc, Mutex, MutexGuard};

    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::Context;
    use tracing_subscriber::registry::LookupSpan;

    /// Fields recorded against a span or event, keyed by field name.
    pub type Fields = BTreeMap<String, String>;

    /// A span that has closed, with every field recorded during its lifetime.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CapturedSpan {
        /// Span name from the metadata.
        pub name: String,
        /// Fields recorded at creation or later via `Span::record`.
        pub fields: Fields,
    }

    /// An emitted event.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CapturedEvent {
        /// Level the event was emitted at.
        pub level: Level,
        /// Value of the `message` field, empty when absent.
        pub message: String,
        /// Remaining structured fields.
        pub fields: Fields,
    }

    #[derive(Default)]
    struct Captured {
        spans: Vec<CapturedSpan>,
        events: Vec<CapturedEvent>,
    }

    /// Layer that stores closed spans and emitted events for later
    /// inspection. Clones share the same storage.
    ///
    /// # Examples
    /// ```
    /// use trestle_test_support::tracing::CaptureLayer;
    /// use tracing_subscriber::layer::SubscriberExt;
    ///
    /// let capture = CaptureLayer::default();
    /// let subscriber = tracing_subscriber::registry().with(capture.clone());
    /// tracing::subscriber::with_default(subscriber, || {
    ///     tracing::info!(edges = 3, "wired");
    /// });
    /// let events = capture.events();
    /// assert_eq!(events[0].message, "wired");
    /// assert_eq!(events[0].fields["edges"], "3");
    /// ```
    #[derive(Clone, Default)]
    pub struct CaptureLayer {
        captured: Arc<Mutex<Captured>>,
    }

    impl CaptureLayer {
        /// Spans in the order they closed.
        #[must_use]
        pub fn spans(&self) -> Vec<CapturedSpan> {
            self.lock().spans.clone()
        }

        /// Events in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<CapturedEvent> {
            self.lock().events.clone()
        }

        /// The first closed span named `name`.
        #[must_use]
        pub fn span(&self, name: &str) -> Option<CapturedSpan> {
            self.lock()
                .spans
                .iter()
                .find(|span| span.name == name)
                .cloned()
        }

        /// Events at `level` whose message equals `message`.
        #[must_use]
        pub fn events_with(&self, level: Level, message: &str) -> Vec<CapturedEvent> {
            self.lock()
                .events
                .iter()
                .filter(|event| event.level == level && event.message == message)
                .cloned()
                .collect()
        }

        fn lock(&self) -> MutexGuard<'_, Captured> {
            match self.captured.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            }
        }
    }

    struct PendingSpan {
        name: &'static str,
        fields: Fields,
    }

    impl<S> Layer<S> for CaptureLayer
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut fields = Fields::new();
            attrs.record(&mut FieldCollector(&mut fields));
            span.extensions_mut().insert(PendingSpan {
                name: attrs.metadata().name(),
                fields,
            });
        }

        fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            if let Some(pending) = span.extensions_mut().get_mut::<PendingSpan>() {
                values.record(&mut FieldCollector(&mut pending.fields));
            }
        }

        fn on_close(&self, id: Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let Some(pending) = span.extensions_mut().remove::<PendingSpan>() else {
                return;
            };
            self.lock().spans.push(CapturedSpan {
                name: pending.name.to_owned(),
                fields: pending.fields,
            });
        }

        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = Fields::new();
            event.record(&mut FieldCollector(&mut fields));
            let message = fields.remove("message").unwrap_or_default();
            self.lock().events.push(CapturedEvent {
                level: *event.metadata().level(),
                message,
                fields,
            });
        }
    }

    struct FieldCollector<'a>(&'a mut Fields);

    impl Visit for FieldCollector<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_owned(), value.to_owned());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_owned(), format!("{value:?}"));
        }
    }
}

pub mod property {
    //! Environment-driven proptest configuration.

    use std::env;

    use proptest::test_runner::Config;

    /// Environment variable overriding the number of cases per property.
    pub const CASES_ENV_KEY: &str = "TRESTLE_PBT_CASES";

    /// Builds a proptest configuration running `default_cases` cases unless
    /// [`CASES_ENV_KEY`] holds a positive integer.
    ///
    /// # Examples
    /// ```
    /// use trestle_test_support::property::suite_proptest_config;
    ///
    /// assert!(suite_proptest_config(16).cases > 0);
    /// ```
    #[must_use]
    pub fn suite_proptest_config(default_cases: u32) -> Config {
        let cases = env::var(CASES_ENV_KEY)
            .ok()
            .and_then(|raw| parse_cases(&raw))
            .unwrap_or(default_cases);
        Config {
            cases,
            ..Config::default()
        }
    }

    fn parse_cases(raw: &str) -> Option<u32> {
        match raw.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(cases) => Some(cases),
            Err(error) => {
                tracing::warn!(
                    env = CASES_ENV_KEY,
                    raw,
                    %error,
                    "invalid property-test case override; using default"
                );
                None
            }
        }
    }

}
