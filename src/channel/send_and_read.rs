use super::Channel;
use super::OperationOptions;
use crate::errors::{
    ErrorKind,
    ScrapliError,
};
use crate::util::strings::string_contains_any_substring;
use chrono::{
    Duration as ChronoDuration,
    Utc,
};
use core::time::Duration;

impl Channel {
    /// Send an input to the device and read until *any* of: the prompt is seen, one of
    /// `expected_outputs` is seen in the decoded output so far, or `read_duration` elapses --
    /// whichever happens first. Unlike `send_input_bytes`, running out of `read_duration` without
    /// seeing the prompt is not an error -- it simply ends the read, returning whatever was
    /// collected. This is useful for commands that open an asynchronous/streaming session (e.g.
    /// a "monitor" or "tail" style command) where there may be no terminating prompt at all within
    /// a reasonable window.
    ///
    /// # Errors
    ///
    /// Returns a `ScrapliError` if something that cannot be recovered from occurs, or if
    /// `options.timeout`/the channel's `timeout_ops` elapses before the read completes.
    pub fn send_input_and_read(
        &mut self,
        input: &str,
        expected_outputs: &[String],
        read_duration: Option<Duration>,
        options: &OperationOptions,
    ) -> Result<Vec<u8>, ScrapliError> {
        let b = input.as_bytes();

        let op_timeout =
            match ChronoDuration::from_std(options.timeout.unwrap_or(self.args.timeout_ops)) {
                Ok(timeout) => timeout,
                Err(err) => {
                    return Err(ScrapliError {
                        kind: ErrorKind::ValueError,
                        details: format!(
                            "failed casting std Duration to chrono Duration, this shouldn't happen, error: {err}"
                        ),
                    })
                }
            };

        let op_deadline = Utc::now() + op_timeout;

        let read_deadline = read_duration.map(|d| {
            Utc::now()
                + ChronoDuration::from_std(d)
                    .unwrap_or_else(|_| ChronoDuration::zero())
        });

        self.write(b)?;

        let mut rb: Vec<u8> = vec![];

        loop {
            if op_deadline <= Utc::now() {
                return Err(ScrapliError {
                    kind: ErrorKind::OperationTimeout,
                    details: String::from("timed out sending input to device"),
                });
            }

            let (found, result) = self._read_and_check_for_fuzzy(rb.as_slice(), b);
            rb = result?;

            if found {
                break;
            }
        }

        self.write_return()?;

        let mut rb: Vec<u8> = vec![];

        loop {
            if op_deadline <= Utc::now() {
                return Err(ScrapliError {
                    kind: ErrorKind::OperationTimeout,
                    details: String::from("timed out sending input to device"),
                });
            }

            let (prompt_found, result) = self._read_and_check_for_prompt(rb.as_slice());
            rb = result?;

            if prompt_found {
                break;
            }

            if !expected_outputs.is_empty() {
                let decoded = String::from_utf8_lossy(rb.as_slice());

                if string_contains_any_substring(&decoded, expected_outputs.to_vec()) {
                    break;
                }
            }

            if let Some(deadline) = read_deadline {
                if deadline <= Utc::now() {
                    break;
                }
            }

            std::thread::sleep(self.args.read_delay / 8);
        }

        Ok(rb)
    }
}
