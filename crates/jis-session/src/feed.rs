use jis_core::encoder::{EncodeError, Encoder};
use tracing::{debug, debug_span};

use super::IncrementalEncoder;

impl IncrementalEncoder {
    /// Encode the next chunk.
    ///
    /// Error offsets count scalars from the start of the deferred lead (if
    /// any) followed by `chunk`. On error the session state is unchanged, so
    /// the caller may retry with corrected input.
    pub fn feed(&mut self, chunk: &str, is_final: bool) -> Result<Vec<u8>, EncodeError> {
        let _span = debug_span!(
            "feed",
            mode = %self.mode,
            len = chunk.len(),
            is_final,
            pending = self.pending.is_some()
        )
        .entered();

        let chars: Vec<char> = self.pending.into_iter().chain(chunk.chars()).collect();
        let encoder = Encoder::new(&self.table, self.mode);

        let mut out = Vec::with_capacity(chars.len() * 2);
        let mut plane = self.plane;
        let pending = encoder.encode_into(&chars, &mut plane, !is_final, &mut out)?;
        if is_final {
            encoder.finish(&mut out, &mut plane);
        }

        self.pending = pending;
        self.plane = plane;
        debug!(bytes = out.len(), deferred = pending.is_some(), "fed");
        Ok(out)
    }

    /// Flush a deferred scalar and return to the default plane.
    pub fn finish(&mut self) -> Result<Vec<u8>, EncodeError> {
        self.feed("", true)
    }
}
