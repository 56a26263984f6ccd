//! In-memory transport that records reports instead of sending them to a host.
use std::collections::VecDeque;

use crate::input::target::{ReportSink, ReportType};

use super::{HidTransport, TransportError};

/// Maximum size of a reply to a GET_REPORT request
const MAX_REPLY_SIZE: usize = 64;

/// A report written to the [LoopbackTransport]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentReport {
    pub report_id: u8,
    pub data: Vec<u8>,
}

/// A simulated request coming from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRequest {
    GetReport {
        report_id: u8,
        report_type: ReportType,
    },
    SetReport {
        report_id: u8,
        report_type: ReportType,
        data: Vec<u8>,
    },
}

/// The [LoopbackTransport] behaves like a host that enumerates the device as
/// soon as it is attached. Readiness can be overridden to simulate a busy or
/// unplugged endpoint, and sends can be made to fail.
#[derive(Debug, Default)]
pub struct LoopbackTransport {
    descriptor: Option<Vec<u8>>,
    ready: bool,
    fail_sends: bool,
    fail_polls: bool,
    attach_count: usize,
    detach_count: usize,
    sent: Vec<SentReport>,
    requests: VecDeque<HostRequest>,
    replies: Vec<Vec<u8>>,
}

impl LoopbackTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override whether the host is ready to receive reports
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Make every following send fail with a stream error
    pub fn set_fail_sends(&mut self, fail: bool) {
        self.fail_sends = fail;
    }

    /// Make every following poll fail, as if a reply to the host could not
    /// be written
    pub fn set_fail_polls(&mut self, fail: bool) {
        self.fail_polls = fail;
    }

    /// Queue a request that will be delivered on the next poll
    pub fn queue_request(&mut self, request: HostRequest) {
        self.requests.push_back(request);
    }

    pub fn is_attached(&self) -> bool {
        self.descriptor.is_some()
    }

    /// Returns the descriptor the device was attached with
    pub fn descriptor(&self) -> Option<&[u8]> {
        self.descriptor.as_deref()
    }

    pub fn attach_count(&self) -> usize {
        self.attach_count
    }

    pub fn detach_count(&self) -> usize {
        self.detach_count
    }

    pub fn sent_reports(&self) -> &[SentReport] {
        &self.sent
    }

    pub fn last_report(&self) -> Option<&SentReport> {
        self.sent.last()
    }

    /// Replies produced for GET_REPORT requests, in order
    pub fn replies(&self) -> &[Vec<u8>] {
        &self.replies
    }

    pub fn pending_requests(&self) -> usize {
        self.requests.len()
    }
}

impl HidTransport for LoopbackTransport {
    fn attach(&mut self, descriptor: &[u8]) -> Result<(), TransportError> {
        self.descriptor = Some(descriptor.to_vec());
        self.ready = true;
        self.attach_count += 1;
        Ok(())
    }

    fn detach(&mut self) -> Result<(), TransportError> {
        if self.descriptor.take().is_none() {
            return Err(TransportError::NotAttached);
        }
        self.ready = false;
        self.detach_count += 1;
        Ok(())
    }

    fn ready(&self) -> bool {
        self.is_attached() && self.ready
    }

    fn send_report(&mut self, report_id: u8, data: &[u8]) -> Result<(), TransportError> {
        if !self.is_attached() {
            return Err(TransportError::NotAttached);
        }
        if self.fail_sends {
            return Err(TransportError::Stream("endpoint busy".to_string()));
        }
        log::trace!("Loopback report {report_id}: {:?}", data);
        self.sent.push(SentReport {
            report_id,
            data: data.to_vec(),
        });
        Ok(())
    }

    fn poll(&mut self, sink: &mut dyn ReportSink) -> Result<(), TransportError> {
        if self.fail_polls {
            return Err(TransportError::Stream("reply not written".to_string()));
        }
        while let Some(request) = self.requests.pop_front() {
            match request {
                HostRequest::GetReport {
                    report_id,
                    report_type,
                } => {
                    let mut buf = [0; MAX_REPLY_SIZE];
                    let size = sink.on_get_report(report_id, report_type, &mut buf);
                    let Some(reply) = buf.get(..size) else {
                        return Err(TransportError::InvalidReport(format!(
                            "reply of {size} bytes exceeds {MAX_REPLY_SIZE}"
                        )));
                    };
                    self.replies.push(reply.to_vec());
                }
                HostRequest::SetReport {
                    report_id,
                    report_type,
                    data,
                } => sink.on_set_report(report_id, report_type, &data),
            }
        }
        Ok(())
    }
}
