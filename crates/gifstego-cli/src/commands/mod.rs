use gifstego_core::api::hide::HideReport;

pub mod analyze;
pub mod gather;
pub mod hide;
pub mod recover;
pub mod spread;

/// One line outcome of a hide pass, the per frame warnings were logged by the pass itself.
pub(crate) fn hide_summary(report: &HideReport, payloads: usize) -> String {
    let mut summary = format!(
        "Hid {} of {} payload(s) in {} frame(s)",
        report.embedded.len(),
        payloads,
        report.frames
    );
    if !report.notices.is_empty() {
        summary.push_str(&format!(", {} frame(s) skipped", report.notices.len()));
    }
    if report.unused_payloads > 0 {
        summary.push_str(&format!(", {} payload(s) left over", report.unused_payloads));
    }
    if report.truncated {
        summary.push_str(", the source GIF is truncated");
    }
    summary
}
