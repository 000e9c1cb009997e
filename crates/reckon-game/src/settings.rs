use std::time::Duration;

/// Tunables for a [`Session`](crate::Session).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use reckon_game::SessionSettings;
///
/// let settings = SessionSettings::default().invalid_move_delay(Duration::from_millis(250));
/// assert_eq!(settings.invalid_move_delay, Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// How long a rejected move stays visible before the selection is cleared.
    pub invalid_move_delay: Duration,
}

impl SessionSettings {
    /// Default for [`SessionSettings::invalid_move_delay`].
    pub const DEFAULT_INVALID_MOVE_DELAY: Duration = Duration::from_millis(600);

    /// Sets the delay before a rejected move is cleared.
    #[must_use]
    pub fn invalid_move_delay(mut self, delay: Duration) -> Self {
        self.invalid_move_delay = delay;
        self
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            invalid_move_delay: Self::DEFAULT_INVALID_MOVE_DELAY,
        }
    }
}
