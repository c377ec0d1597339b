mod evaluation;
mod report;

#[doc(inline)]
pub use evaluation::Evaluation;
#[doc(inline)]
pub use report::BinReport;
#[doc(inline)]
pub use report::ExportRow;
#[doc(inline)]
pub use report::Report;
#[doc(inline)]
pub use report::ReportItem;
