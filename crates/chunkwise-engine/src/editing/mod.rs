/*!
 * # Chunk Editing Module
 *
 * Word-level editing of a chunked sentence, plus the session and activation
 * layers a front end drives it through.
 *
 * ## Architecture Overview
 *
 * ### 1. Command-Based Editing
 * - All edits are **Commands** (`Cmd` enum): `Split`, `Merge`, `ToggleVerb`
 * - `apply()` returns a **`Patch`** naming the chunk range touched
 * - After every split or merge, tags are renumbered to `1..=N`
 * - Bad indices are reported as `EditError` and leave the sequence untouched
 *
 * ### 2. Words, Not Characters
 * - Commands address words, derived on demand from a chunk's segments
 * - Segments are rebuilt through the word helpers after every edit, so the
 *   chunk text and its segments never disagree
 *
 * ### 3. Committed + Draft
 * - **`EditSession`** keeps the committed sentence and an optional draft
 * - Structural edits only ever touch the draft; `commit` hands it over and
 *   `cancel` throws it away
 *
 * ### 4. Single vs Double Activation
 * - **`ClickResolver`** is a two-state machine (`Idle`, `PendingSplit`)
 * - A single activation on a word settles as a split once its window passes;
 *   a second one on the same word inside the window settles as an emphasis toggle
 * - The caller supplies `Instant`s, so there are no timers to manage
 *
 * ## Module Structure
 *
 * - **`commands`**: `Cmd` enum and the split / merge / toggle operations
 * - **`patch`**: edit result metadata
 * - **`error`**: `EditError`
 * - **`session`**: `EditSession`
 * - **`gesture`**: `ClickResolver`, `Resolution`, `WordTarget`
 *
 * ## Usage Pattern
 *
 * ```rust
 * use chunkwise_engine::editing::*;
 * use std::time::Instant;
 *
 * let mut session = EditSession::from_tagged("<c1>The <v>quick</v> fox</c1> <c2>jumps</c2>");
 * session.begin_edit().unwrap();
 *
 * let mut resolver = ClickResolver::default();
 * let t0 = Instant::now();
 * assert_eq!(resolver.activate(WordTarget::new(0, 2), t0), None);
 *
 * if let Some(resolution) = resolver.poll(t0 + resolver.window()) {
 *     session.apply(resolution.into_cmd()).unwrap();
 * }
 *
 * session.commit().unwrap();
 * assert_eq!(session.committed().display(), "The quick / fox / jumps");
 * ```
 */

pub mod commands;
pub mod error;
pub mod gesture;
pub mod patch;
pub mod session;

pub use commands::{Cmd, apply};
pub use error::EditError;
pub use gesture::{ClickResolver, DEFAULT_DOUBLE_ACTIVATION_WINDOW, Resolution, WordTarget};
pub use patch::Patch;
pub use session::EditSession;
