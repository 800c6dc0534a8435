/// Single-slot, latest-wins holder for the message shown in the error banner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorChannel {
    message: Option<String>,
}

impl ErrorChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites whatever message was pending.
    pub fn set(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn current(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
