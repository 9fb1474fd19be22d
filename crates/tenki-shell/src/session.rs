//! The forecast session: selection, trigger, output state.
//!
//! State machine: `Idle` until the first trigger; `Loading` while a fetch
//! is in flight; `Shown` with either forecast lines or a message. The
//! fetch runs synchronously inside `trigger()`, so triggers are
//! serialized: a second trigger cannot start while one is in flight.

use std::sync::Arc;

use tenki_core::ForecastError;
use tenki_jma::{AreaCatalog, AreaEntry, DisplayLine};
use tenki_store::{WeatherRecord, WeatherStore};

use crate::error_mapping::{forecast_error, message_for};
use crate::source::ForecastSource;

/// What the output region currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Extracted forecast lines. May be empty when no time-series entry
    /// carried weather text; the output region is then empty with no
    /// message, matching the upstream behavior.
    Forecast(Vec<DisplayLine>),
    /// A user-facing message for a recovered error.
    Message(String),
}

/// Session state, per trigger cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    Shown(Outcome),
}

/// One windowed session: area catalog, current selection and output.
pub struct ForecastSession<S: ForecastSource> {
    catalog: AreaCatalog,
    source: S,
    store: Option<Arc<WeatherStore>>,
    selection: Option<String>,
    state: SessionState,
}

impl<S: ForecastSource> ForecastSession<S> {
    pub fn new(catalog: AreaCatalog, source: S) -> Self {
        Self {
            catalog,
            source,
            store: None,
            selection: None,
            state: SessionState::Idle,
        }
    }

    /// Attach a store; every displayed line is then appended to it.
    pub fn with_store(mut self, store: Arc<WeatherStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// The selectable areas, in catalog order.
    pub fn areas(&self) -> &[AreaEntry] {
        self.catalog.entries()
    }

    /// Set the current selection by display name.
    pub fn select(&mut self, name: impl Into<String>) {
        self.selection = Some(name.into());
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> Option<&Arc<WeatherStore>> {
        self.store.as_ref()
    }

    /// The trigger action: fetch, extract, optionally persist, show.
    ///
    /// Every error is recovered here into a `Shown` message; nothing
    /// escapes to the caller.
    pub fn trigger(&mut self) -> &SessionState {
        let Some(name) = self.selection.clone() else {
            self.state = SessionState::Shown(Outcome::Message(message_for(
                &ForecastError::NoSelection,
            )));
            return &self.state;
        };

        let Some(code) = self.catalog.code_for(&name).map(str::to_string) else {
            tracing::warn!("selected area {:?} missing from catalog", name);
            self.state = SessionState::Shown(Outcome::Message(message_for(
                &ForecastError::UnknownArea(name),
            )));
            return &self.state;
        };

        self.state = SessionState::Loading;
        tracing::info!("fetching forecast for {} ({})", name, code);

        let outcome = match self.source.fetch_lines(&code) {
            Ok(lines) => {
                self.persist(&lines);
                Outcome::Forecast(lines)
            }
            Err(e) => {
                let error = forecast_error(e);
                tracing::warn!("forecast for {} failed: {}", code, error);
                Outcome::Message(message_for(&error))
            }
        };

        self.state = SessionState::Shown(outcome);
        &self.state
    }

    /// Append each displayed line to the store, when one is attached.
    /// A failed insert is logged and does not disturb the rendered output.
    fn persist(&self, lines: &[DisplayLine]) {
        let Some(store) = &self.store else {
            return;
        };

        for line in lines {
            match store.append(&WeatherRecord::from_display_line(line)) {
                Ok(id) => tracing::debug!("persisted {} as row {}", line.area_name, id),
                Err(e) => tracing::warn!("failed to persist {}: {}", line.area_name, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tenki_jma::JmaError;

    enum StubBehavior {
        Lines(Vec<DisplayLine>),
        Status(u16),
        Parse(&'static str),
    }

    struct StubSource {
        behavior: StubBehavior,
        calls: Arc<AtomicUsize>,
    }

    impl ForecastSource for StubSource {
        fn fetch_lines(&self, _code: &str) -> Result<Vec<DisplayLine>, JmaError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                StubBehavior::Lines(lines) => Ok(lines.clone()),
                StubBehavior::Status(status) => Err(JmaError::Status(*status)),
                StubBehavior::Parse(cause) => Err(JmaError::Parse((*cause).to_string())),
            }
        }
    }

    fn catalog() -> AreaCatalog {
        let metadata = serde_json::from_value(serde_json::json!({
            "offices": {
                "130000": { "name": "東京都" },
                "270000": { "name": "大阪府" }
            }
        }))
        .unwrap();
        AreaCatalog::from_metadata(&metadata)
    }

    fn line(name: &str, text: &str) -> DisplayLine {
        DisplayLine { area_name: name.to_string(), text: text.to_string() }
    }

    fn session(behavior: StubBehavior) -> (ForecastSession<StubSource>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = StubSource { behavior, calls: calls.clone() };
        (ForecastSession::new(catalog(), source), calls)
    }

    #[test]
    fn starts_idle() {
        let (session, _) = session(StubBehavior::Lines(vec![]));
        assert_eq!(*session.state(), SessionState::Idle);
    }

    #[test]
    fn trigger_without_selection_shows_message_and_skips_fetch() {
        let (mut session, calls) = session(StubBehavior::Lines(vec![line("A", "晴れ")]));

        session.trigger();

        assert_eq!(
            *session.state(),
            SessionState::Shown(Outcome::Message("地域を選択してください。".to_string()))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unknown_selection_shows_message_and_skips_fetch() {
        let (mut session, calls) = session(StubBehavior::Lines(vec![]));

        session.select("存在しない地域");
        session.trigger();

        assert_eq!(
            *session.state(),
            SessionState::Shown(Outcome::Message("地域コードが見つかりません。".to_string()))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn successful_trigger_shows_forecast() {
        let lines = vec![line("東京地方", "くもり"), line("伊豆諸島北部", "晴れ")];
        let (mut session, calls) = session(StubBehavior::Lines(lines.clone()));

        session.select("東京都");
        session.trigger();

        assert_eq!(*session.state(), SessionState::Shown(Outcome::Forecast(lines)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_extraction_shows_empty_forecast_not_message() {
        let (mut session, _) = session(StubBehavior::Lines(vec![]));

        session.select("東京都");
        session.trigger();

        assert_eq!(*session.state(), SessionState::Shown(Outcome::Forecast(vec![])));
    }

    #[test]
    fn fetch_failure_shows_unavailable_message() {
        let (mut session, _) = session(StubBehavior::Status(503));

        session.select("東京都");
        session.trigger();

        assert_eq!(
            *session.state(),
            SessionState::Shown(Outcome::Message(
                "天気予報データの取得に失敗しました。".to_string()
            ))
        );
    }

    #[test]
    fn parse_failure_message_carries_cause() {
        let (mut session, _) = session(StubBehavior::Parse("missing timeSeries"));

        session.select("東京都");
        session.trigger();

        match session.state() {
            SessionState::Shown(Outcome::Message(message)) => {
                assert_eq!(message, "データ解析エラー: missing timeSeries");
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn retrigger_from_shown_fetches_again() {
        let (mut session, calls) = session(StubBehavior::Lines(vec![line("A", "晴れ")]));

        session.select("東京都");
        session.trigger();
        session.select("大阪府");
        session.trigger();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(matches!(session.state(), SessionState::Shown(Outcome::Forecast(_))));
    }

    #[test]
    fn store_receives_one_row_per_line() {
        let store = Arc::new(WeatherStore::in_memory().unwrap());
        let lines = vec![line("東京地方", "くもり"), line("伊豆諸島北部", "晴れ")];
        let calls = Arc::new(AtomicUsize::new(0));
        let source = StubSource { behavior: StubBehavior::Lines(lines), calls };

        let mut session =
            ForecastSession::new(catalog(), source).with_store(store.clone());

        session.select("東京都");
        session.trigger();

        assert_eq!(store.count().unwrap(), 2);
        let rows = store.recent(10).unwrap();
        assert_eq!(rows[1].city, "東京地方");
        assert_eq!(rows[1].condition, "くもり");
        assert_eq!(rows[1].temperature, None);
        assert_eq!(rows[1].date, "Today");
    }

    #[test]
    fn guard_paths_do_not_write_to_store() {
        let store = Arc::new(WeatherStore::in_memory().unwrap());
        let calls = Arc::new(AtomicUsize::new(0));
        let source = StubSource { behavior: StubBehavior::Status(500), calls };

        let mut session =
            ForecastSession::new(catalog(), source).with_store(store.clone());

        session.trigger(); // no selection
        session.select("東京都");
        session.trigger(); // fetch fails

        assert_eq!(store.count().unwrap(), 0);
    }
}
