use crate::drivers::switch_pro::encoder::Report;

pub mod switch_pro;
#[cfg(test)]
pub mod switch_pro_test;

/// Kind of report a host request refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    Input,
    Output,
    Feature,
}

/// A [DescriptorProvider] supplies the HID report descriptor that the
/// transport hands to the host during enumeration.
pub trait DescriptorProvider {
    fn descriptor(&self) -> &[u8];
}

/// A [ReportSource] produces the input report the transport sends to the host.
pub trait ReportSource {
    fn current_report(&self) -> Report;
}

/// A [ReportSink] answers requests the host makes on the control channel.
pub trait ReportSink {
    /// Handle a GET_REPORT request by writing the report into `buf`. Returns
    /// the number of bytes written; zero means the report is not supported.
    fn on_get_report(&mut self, report_id: u8, report_type: ReportType, buf: &mut [u8]) -> usize;

    /// Handle a SET_REPORT request from the host.
    fn on_set_report(&mut self, report_id: u8, report_type: ReportType, data: &[u8]);
}
