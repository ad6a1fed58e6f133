//! Append-only chat transcript.
//!
//! The transcript is a linear sequence of user/assistant turns. Turns are
//! appended and never edited or removed; it is cleared only by a page reload.

/// Who produced a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
	/// The person asking questions.
	User,
	/// The backend assistant.
	Assistant,
}

/// One utterance in the conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatTurn {
	/// Originator of the turn.
	pub speaker: Speaker,
	/// Raw text; assistant turns are parsed into blocks at render time.
	pub text: String,
}

/// Fixed text appended as the assistant turn when a query fails.
pub const QUERY_ERROR: &str = "Error querying the assistant";

/// Ordered list of chat turns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
	turns: Vec<ChatTurn>,
}

impl Transcript {
	/// Append a user turn.
	pub fn push_user(&mut self, text: impl Into<String>) {
		self.turns.push(ChatTurn {
			speaker: Speaker::User,
			text: text.into(),
		});
	}

	/// Append an assistant turn.
	pub fn push_assistant(&mut self, text: impl Into<String>) {
		self.turns.push(ChatTurn {
			speaker: Speaker::Assistant,
			text: text.into(),
		});
	}

	/// Append the fixed error turn for a failed query.
	pub fn push_error(&mut self) {
		self.push_assistant(QUERY_ERROR);
	}

	/// All turns, oldest first.
	pub fn turns(&self) -> &[ChatTurn] {
		&self.turns
	}

	/// Whether no turn has been recorded yet.
	pub fn is_empty(&self) -> bool {
		self.turns.is_empty()
	}
}
