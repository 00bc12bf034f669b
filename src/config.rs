//! Run configuration.

use crate::bus::ROM_BASE;

/// Instructions executed when no budget is given.
pub const DEFAULT_STEPS: usize = 19_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Run budget in instructions.
    pub steps: usize,
    /// Absolute ROM address execution starts from.
    pub entry: u16,
    /// Emit an instruction trace at trace log level.
    pub trace: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            entry: ROM_BASE,
            trace: false,
        }
    }
}

/// Parse `$8000`, `0x8000` or decimal `32768`.
pub fn parse_address(text: &str) -> Result<u16, String> {
    let text = text.trim();
    let parsed = if let Some(hex) = text.strip_prefix('$').or_else(|| text.strip_prefix("0x")) {
        u16::from_str_radix(hex, 16)
    } else {
        text.parse::<u16>()
    };
    parsed.map_err(|err| format!("invalid address '{}': {}", text, err))
}
