use std::io::{self, IsTerminal, Write};

use app_logging::app_debug;
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;

/// Copies `text` to the system clipboard through the terminal (OSC 52).
/// Returns `false` when stdout is not a terminal or the write fails.
pub fn copy_text(text: &str) -> bool {
    let stdout = io::stdout();
    if !stdout.is_terminal() {
        app_debug!("Clipboard unavailable: stdout is not a terminal");
        return false;
    }
    let mut out = stdout.lock();
    match write_osc52(&mut out, text) {
        Ok(()) => true,
        Err(err) => {
            app_debug!("Clipboard write failed: {}", err);
            false
        }
    }
}

fn write_osc52(out: &mut impl Write, text: &str) -> io::Result<()> {
    write!(out, "\x1b]52;c;{}\x07", B64.encode(text))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osc52_sequence_wraps_base64_payload() {
        let mut buf = Vec::new();
        write_osc52(&mut buf, "hi there").unwrap();
        assert_eq!(buf, b"\x1b]52;c;aGkgdGhlcmU=\x07");
    }
}
