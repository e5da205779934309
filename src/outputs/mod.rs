//! Tabular output writers.
//!
//! Three files are produced per run:
//!
//! - [`raw`]: the raw-results CSV, appended across runs so a day's searches
//!   accumulate in one file
//! - [`urls`]: a flat URL-list file, overwritten each run
//! - [`rated`]: the rated-results CSV combining article metadata with the
//!   AI analysis, overwritten each run
//!
//! ```text
//! grcdata.csv        date,keyword,title,description,url
//! urls.csv           one URL per row
//! grcdata_rated.csv  raw fields + summary/labels/rating/quality columns
//! ```

pub mod rated;
pub mod raw;
pub mod urls;
