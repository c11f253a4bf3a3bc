//! # TTML Cue Parser: Timed Text Markup to Renderer-Agnostic Caption Cues
//!
//! This crate turns a TTML subtitle document into a flat, ordered list of
//! [`caption_core::Cue`] records. It understands the parts of TTML that matter for
//! playback-side rendering:
//!
//! - clock times (`01:02:03.200`, `00:10:15:15.1` with frames and subframes) and
//!   offset times (`1.5h2.3s`, `75f`, `50t`), driven by the document's `ttp:frameRate`,
//!   `ttp:frameRateMultiplier`, `ttp:subFrameRate` and `ttp:tickRate` parameters;
//! - the `xml:space` whitespace policy;
//! - the style cascade across `<style>`, `<region>` and `<p>` elements, including
//!   region layout (`tts:extent`, `tts:origin`, `tts:writingMode`).
//!
//! The parser works in two passes over the document: the first collects styles,
//! regions and timing parameters into id-keyed tables, the second walks
//! `<body>`/`<div>`/`<p>` and emits cues.
//!
//! ## Examples
//!
//! ```rust
//! use caption_core::{TimeContext, TtmlParsingOptions};
//! use ttml_cue_parser::parse_ttml;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ttml = r#"
//!     <tt xmlns="http://www.w3.org/ns/ttml">
//!       <body>
//!         <div>
//!           <p begin="01:02.05" dur="5s">Hello<br/>world</p>
//!         </div>
//!       </body>
//!     </tt>
//!     "#;
//!
//!     let cues = parse_ttml(
//!         ttml.as_bytes(),
//!         &TimeContext::new(10.0, 0.0, 0.0),
//!         &TtmlParsingOptions::default(),
//!     )?;
//!
//!     assert_eq!(cues.len(), 1);
//!     assert_eq!(cues[0].payload, "Hello\nworld");
//!     assert!((cues[0].start_time - 72.05).abs() < 1e-9);
//!     assert!((cues[0].end_time - 77.05).abs() < 1e-9);
//!     Ok(())
//! }
//! ```

pub mod parser;

pub use parser::time::{TimingParameters, parse_time_expression};
pub use parser::{parse_ttml, parse_ttml_str};
