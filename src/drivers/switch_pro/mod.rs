pub mod driver;
pub mod encoder;
pub mod hid_report;
#[cfg(test)]
pub mod hid_report_test;
pub mod report_descriptor;
