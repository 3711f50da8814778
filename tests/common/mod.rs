//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use std::collections::VecDeque;

use anchor_paste::{AnchorEntry, AnchorPicker, NodeId, Prompt};

/// Initialize log capture for the current test binary. Safe to call from
/// every test; only the first call takes effect.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A [`Prompt`] fed from a queue of canned answers.
///
/// Each call pops the next answer; `None` simulates the user cancelling.
/// Calls beyond the scripted answers cancel too. Prompts seen are recorded
/// as `(message, initial)` pairs for assertions.
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
    pub seen: Vec<(String, String)>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer the user will "type".
    pub fn answer(mut self, text: &str) -> Self {
        self.answers.push_back(Some(text.to_string()));
        self
    }

    /// Queue a cancellation.
    pub fn cancel(mut self) -> Self {
        self.answers.push_back(None);
        self
    }
}

impl Prompt for ScriptedPrompt {
    fn text(&mut self, message: &str, initial: &str) -> Option<String> {
        self.seen.push((message.to_string(), initial.to_string()));
        self.answers.pop_front().flatten()
    }
}

/// An [`AnchorPicker`] that chooses an anchor by display name.
pub struct ScriptedPicker {
    pub pick: Option<String>,
    pub offered: Vec<String>,
}

impl ScriptedPicker {
    pub fn choosing(name: &str) -> Self {
        Self {
            pick: Some(name.to_string()),
            offered: Vec::new(),
        }
    }

    pub fn cancelling() -> Self {
        Self {
            pick: None,
            offered: Vec::new(),
        }
    }
}

impl AnchorPicker for ScriptedPicker {
    fn choose(&mut self, anchors: &[AnchorEntry]) -> Option<NodeId> {
        self.offered = anchors
            .iter()
            .map(|entry| entry.display_name.clone())
            .collect();
        let wanted = self.pick.as_deref()?;
        anchors
            .iter()
            .find(|entry| entry.display_name == wanted)
            .map(|entry| entry.node)
    }
}
