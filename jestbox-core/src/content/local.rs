//! Jokes from the embedded record file

use alloc::format;

use jestbox_display::{DisplayError, RenderSurface};
use jestbox_hal::{HttpTransport, RecordStore};
use jestbox_protocol::{decode_record, JokeRecord};
use rand_core::RngCore;

use super::{report, ContentSource, FetchError, Slot, SlotStatus};
use crate::sanitize::sanitize;

/// Separator between setup and punchline
const SEPARATOR: &str = "\n---\n";

/// Picks a random record from a local store
pub struct LocalJoke<R: RecordStore, G: RngCore> {
    store: R,
    rng: G,
    slot: Slot<JokeRecord>,
}

impl<R: RecordStore, G: RngCore> LocalJoke<R, G> {
    pub fn new(store: R, rng: G) -> Self {
        Self {
            store,
            rng,
            slot: Slot::Empty,
        }
    }

    /// Current slot
    pub fn slot(&self) -> &Slot<JokeRecord> {
        &self.slot
    }

    /// Uniform index in `0..len`
    ///
    /// Multiply-shift maps a 32-bit sample onto the range without the
    /// bias of a plain modulo.
    fn pick(&mut self, len: usize) -> usize {
        ((self.rng.next_u32() as u64 * len as u64) >> 32) as usize
    }

    fn read(&mut self) -> Result<JokeRecord, FetchError> {
        let len = self.store.len();
        if len == 0 {
            return Err(FetchError::NoRecords);
        }

        let index = self.pick(len);
        let line = self
            .store
            .record(index)
            .ok_or(FetchError::RecordMissing(index))?;
        let record = decode_record(line)?;

        Ok(JokeRecord {
            setup: sanitize(&record.setup),
            punchline: sanitize(&record.punchline),
        })
    }
}

impl<R: RecordStore, G: RngCore> ContentSource for LocalJoke<R, G> {
    async fn fetch<S: RenderSurface, T: HttpTransport>(&mut self, surface: &mut S, _transport: &mut T) {
        report(surface, "Reading local joke...");
        self.slot.begin();
        let result = self.read();
        self.slot.settle(result);
    }

    fn display<S: RenderSurface>(&self, surface: &mut S) -> Result<(), DisplayError> {
        self.slot.render(surface, |joke, surface| {
            let text = format!("{}{}{}", joke.setup, SEPARATOR, joke.punchline);
            surface.draw_text(0, 0, &text)
        })
    }

    fn status(&self) -> SlotStatus {
        self.slot.status()
    }
}
