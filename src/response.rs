extern crate chrono;
use crate::errors::{
    ErrorKind,
    ScrapliError,
};
use chrono::offset::Utc;
use chrono::{
    Duration,
    NaiveDateTime,
};

/// Decodes `b` as UTF-8, falling back to ISO-8859-1 (a direct byte-to-codepoint mapping, total over
/// every possible byte value) if the bytes are not valid UTF-8. Devices occasionally emit raw
/// 8-bit bytes (degraded serial/telnet links, vendor-specific banners) that are not valid UTF-8;
/// this avoids ever failing to decode a response.
fn decode_lossy(b: &[u8]) -> String {
    match String::from_utf8(b.to_vec()) {
        Ok(s) => s,
        Err(_) => b.iter().map(|&byte| byte as char).collect(),
    }
}

/// Response is an object returned from "successful" (as in no *errors*) scraplirs driver
/// operations.
#[allow(dead_code)]
pub struct Response {
    /// The host(name) of the device being interacted with.
    pub host: String,
    /// The port of the device being interacted with.
    pub port: u16,
    /// The actual input sent to the device.
    pub input: String,
    /// "Raw" (bytes) output of the operation represented by this `Response`.
    pub raw_result: Vec<u8>,
    /// String output of the output of the operation represented by this `Response`.
    pub result: String,
    /// Starting time of the operation represented by this `Response`.
    pub start_time: NaiveDateTime,
    /// Ending time of the operation represented by this `Response`.
    pub end_time: NaiveDateTime,
    /// Total time the operation represented by this `Response` took.
    pub elapsed_time: Duration,
    /// A list of strings that, if seen in an output, indicate that the originating input/command
    /// "failed".
    pub failed_when_contains: Vec<String>,
    /// Indicates if the operation was a success or failure. Failure in this case means we saw some
    /// `failed_when_contains` output in the response, *not* that there was an unrecoverable error.
    /// The latter case would result in an error being returned not a `Response` object.
    pub failed: bool,
}

impl Response {
    /// Initializes a new `Response` object.
    #[must_use]
    pub fn new(
        input: &str,
        host: &str,
        port: u16,
        failed_when_contains: Vec<String>,
    ) -> Self {
        Self {
            host: host.to_owned(),
            port,
            input: input.to_owned(),
            raw_result: vec![],
            result: String::new(),
            start_time: Utc::now().naive_utc(),
            end_time: Utc::now().naive_utc(),
            elapsed_time: Duration::zero(),
            failed_when_contains,
            failed: true,
        }
    }

    /// Record the result of an operation.
    pub fn record(
        &mut self,
        b: Vec<u8>,
    ) {
        self.end_time = Utc::now().naive_utc();

        self.elapsed_time = self.end_time - self.start_time;

        self.raw_result = b.clone();
        self.result = decode_lossy(&b);

        let mut is_failed: bool = false;

        for failed_when_contains_item in self.failed_when_contains.clone() {
            if !self.result.contains(&failed_when_contains_item) {
                continue;
            }

            is_failed = true;

            break;
        }

        if !is_failed {
            self.failed = false;
        }
    }

    /// Converts a `failed=true` `Response` into a `CommandFailure` error, for call sites that
    /// prefer to handle failures via `?` rather than by inspecting `failed` themselves.
    ///
    /// # Errors
    ///
    /// Returns a `ScrapliError` of kind `CommandFailure` if `self.failed` is true.
    pub fn raise_for_status(&self) -> Result<(), ScrapliError> {
        if !self.failed {
            return Ok(());
        }

        Err(ScrapliError {
            kind: ErrorKind::CommandFailure,
            details: format!(
                "input '{}' failed, matched a failed_when_contains marker in output: {}",
                self.input, self.result
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{
        MultiResponse,
        Response,
    };

    #[test]
    fn record_marks_not_failed_when_no_markers_present() {
        let mut resp = Response::new("show version", "rtr1", 22, vec![String::from("% Invalid")]);

        resp.record(b"IOS 16.12".to_vec());

        assert!(!resp.failed);
        assert_eq!(resp.result, "IOS 16.12");
        assert!(resp.raise_for_status().is_ok());
    }

    #[test]
    fn record_marks_failed_when_marker_present() {
        let mut resp = Response::new("badcmd", "rtr1", 22, vec![String::from("% Invalid")]);

        resp.record(b"% Invalid input detected".to_vec());

        assert!(resp.failed);
        assert!(resp.raise_for_status().is_err());
    }

    #[test]
    fn record_decodes_non_utf8_bytes_lossily_instead_of_panicking() {
        let mut resp = Response::new("show version", "rtr1", 22, vec![]);

        resp.record(vec![0xFF, 0x41]);

        assert_eq!(resp.result.len(), 2);
        assert!(!resp.failed);
    }

    #[test]
    fn multi_response_raise_for_status_surfaces_first_failure() {
        let mut multi = MultiResponse::new("rtr1");

        let mut ok_resp = Response::new("show version", "rtr1", 22, vec![]);
        ok_resp.record(b"IOS 16.12".to_vec());
        multi.record_response(ok_resp);

        let mut failed_resp =
            Response::new("badcmd", "rtr1", 22, vec![String::from("% Invalid")]);
        failed_resp.record(b"% Invalid input".to_vec());
        multi.record_response(failed_resp);

        assert!(multi.failed);
        assert!(multi.raise_for_status().is_err());
    }
}

/// Response is an object returned from "successful" (as in no *errors*) scraplirs driver "multi"
/// operation -- that is a plural operation like `send_commands` or `send_configs` -- it holds the
/// individual `Response` objects for all steps/operations of the parent operation.
#[allow(clippy::module_name_repetitions)]
pub struct MultiResponse {
    /// The host(name) of the device being interacted with.
    pub host: String,
    /// Starting time of the operation represented by this `Response`.
    pub start_time: NaiveDateTime,
    /// Ending time of the operation represented by this `Response`.
    pub end_time: NaiveDateTime,
    /// Total time the operation represented by this `Response` took.
    pub elapsed_time: Duration,
    /// Vec of the individual responses that make up the "multi" response.
    pub responses: Vec<Response>,
    /// Indicates if the operation was a success or failure. Failure in this case means we saw some
    /// `failed_when_contains` output in the response, *not* that there was an unrecoverable error.
    /// The latter case would result in an error being returned not a `Response` object.
    pub failed: bool,
}

impl MultiResponse {
    /// Initializes a new `MultiResponse` object.
    #[must_use]
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_owned(),
            start_time: Utc::now().naive_utc(),
            end_time: Utc::now().naive_utc(),
            elapsed_time: Duration::zero(),
            responses: vec![],
            failed: false,
        }
    }

    /// Appends a response to the `MultiResponse` object.
    pub fn record_response(
        &mut self,
        response: Response,
    ) {
        self.end_time = Utc::now().naive_utc();

        self.elapsed_time = self.end_time - self.start_time;

        if response.failed {
            self.failed = true;
        }

        self.responses.push(response);
    }

    /// Converts a `failed=true` `MultiResponse` (any element failed) into a `CommandFailure` error.
    ///
    /// # Errors
    ///
    /// Returns a `ScrapliError` of kind `CommandFailure` if any element's `failed` is true.
    pub fn raise_for_status(&self) -> Result<(), ScrapliError> {
        if !self.failed {
            return Ok(());
        }

        for response in &self.responses {
            response.raise_for_status()?;
        }

        Ok(())
    }
}
