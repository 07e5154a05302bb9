/*!
 * Word document access.
 *
 * - `package`: the zip container, read fully into memory and written back
 * - `xml`: a lossless XML tree used for the main document part
 * - `model`: paragraphs, runs and tables on top of that tree
 */

pub mod model;
pub mod package;
pub mod xml;

pub use self::model::{Cell, Document, Paragraph, Row, Run, Table};
pub use self::package::{DocxPackage, MAIN_DOCUMENT_PART};
