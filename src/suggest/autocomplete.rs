use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::sleep;

use crate::suggest::AddressSuggester;

/// Inputs under this length clear the suggestions instead of querying.
pub const MIN_QUERY_CHARS: usize = 3;

/// A keystroke registered against an [`AutocompleteField`]. Carries the
/// generation number used to discard superseded lookups.
#[derive(Debug, Clone)]
pub struct Keystroke {
    generation: u64,
    text: String,
}

/// Debounced autocompletion for one address input.
///
/// Each keystroke takes a monotonically increasing generation; resolving a
/// keystroke waits out one quiet interval and then asks the backend, but the
/// result only stands when no newer keystroke arrived in the meantime —
/// checked both before the lookup (debounce) and after it (out-of-order
/// response suppression). A superseded resolution yields `None`, which a
/// caller must treat as "leave the current suggestions alone".
pub struct AutocompleteField {
    suggester: AddressSuggester,
    quiet_interval: Duration,
    generation: AtomicU64,
}

impl AutocompleteField {
    pub fn new(suggester: AddressSuggester, quiet_interval: Duration) -> Self {
        Self {
            suggester,
            quiet_interval,
            generation: AtomicU64::new(0),
        }
    }

    /// Registers a keystroke, superseding every earlier one.
    pub fn keystroke(&self, text: &str) -> Keystroke {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Keystroke {
            generation,
            text: text.to_string(),
        }
    }

    /// `Some(suggestions)` when this keystroke is still the latest once the
    /// quiet interval has passed and the lookup returned; `None` when it was
    /// superseded. Short inputs resolve immediately to an empty list without
    /// touching the backend.
    pub async fn resolve(&self, keystroke: Keystroke) -> Option<Vec<String>> {
        if keystroke.text.chars().count() < MIN_QUERY_CHARS {
            return self.latest(keystroke.generation).then(Vec::new);
        }

        sleep(self.quiet_interval).await;
        if !self.latest(keystroke.generation) {
            return None;
        }

        let suggestions = self.suggester.suggest(&keystroke.text).await;

        // The backend may answer out of order; a response for a stale
        // keystroke must never overwrite a newer input's suggestions.
        if !self.latest(keystroke.generation) {
            return None;
        }

        Some(suggestions)
    }

    /// Registers and resolves in one step.
    pub async fn input(&self, text: &str) -> Option<Vec<String>> {
        let keystroke = self.keystroke(text);
        self.resolve(keystroke).await
    }

    fn latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}
