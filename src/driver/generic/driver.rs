use crate::channel::Channel;
use crate::channel::OperationOptions as ChannelOperationOptions;
use crate::errors::{
    ErrorKind,
    ScrapliError,
};
use crate::response::{
    MultiResponse,
    Response,
};
use crate::transport::base::DEFAULT_PORT;
use chrono::{
    Duration as ChronoDuration,
    Utc,
};
use core::time::Duration;
use log::{
    debug,
    info,
};
use regex::bytes::Regex;
use std::thread;

/// The custom type for generic driver on open/close callables. The `on_open` callable will be
/// executed immediately after authentication and before returning from the `open` method, while the
/// `on_close` variant will be called before closing the transport/channel.
pub type GenericDriverOnXCallable = fn(d: &Driver) -> Result<(), ScrapliError>;

/// `OperationOptions` holds arguments that apply to `Driver` operations (ex: `send_command`).
#[derive(Default, Clone)]
pub struct OperationOptions {
    /// List of strings that when seen as sub strings in some output indicate that the operation was
    /// a failure.
    pub failed_when_contains: Vec<String>,
    /// Indicates if multi operations (send_commands (plural!)) that encounter a failure (based on
    /// `failed_when_contains` output) should stop or not.
    pub stop_on_failed: bool,
    /// Channel operation options that are passed (by the driver) down to the channel during normal
    /// operations.
    pub channel_operation_options: ChannelOperationOptions,
}

/// Args are standard driver args that will be stored with a driver object -- the host and port will
/// be automatically copied from the transport if using normal builder paths.
pub struct Args {
    /// The host the driver is connecting to.
    pub host: String,
    /// The port on the host the driver is connecting to.
    pub port: u16,
    /// The list of strings which indicate command failures.
    pub failed_when_contains: Vec<String>,
    /// The "on open" callable that is executed (if set) immediately after authenticating.
    pub(crate) on_open: Option<GenericDriverOnXCallable>,
    /// The "on close" callable that is executed (if set) right before closing the channel and the
    /// underlying transport.
    pub(crate) on_close: Option<GenericDriverOnXCallable>,
}

impl Args {
    /// Return a new instance of `Args` -- would be just a default impl but we require the host be
    /// set, so we just have this method.
    #[must_use]
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_owned(),
            port: DEFAULT_PORT,
            failed_when_contains: vec![],
            on_open: None,
            on_close: None,
        }
    }
}

/// Driver -- or Generic Driver -- is a generic driver implementation that offers some basic methods
/// for interacting with a device. A (generic) Driver knows nothing about network-y things like
/// privilege levels and the like, and is more of a fancier expect-like interface.
pub struct Driver {
    /// The standard driver args.
    pub args: Args,
    /// The channel the driver interacts with.
    pub channel: Channel,
}

impl Driver {
    /// Create a new (generic) Driver instance.
    #[must_use]
    pub const fn new(
        args: Args,
        channel: Channel,
    ) -> Self {
        Self { args, channel }
    }

    /// Open the driver and the underlying channel and transport.
    ///
    /// # Errors
    ///
    /// Can return an error if opening the channel fails. Can also return an error if the `on_open`
    /// callable is set and it returns an error.
    pub fn open(&mut self) -> Result<(), ScrapliError> {
        debug!(
            "opening connection to host {} on port {}",
            self.args.host, self.args.port
        );

        self.channel.open()?;

        if let Some(f) = self.args.on_open {
            debug!("generic driver `on_open` set, executing");

            f(self)?;
        }

        info!("connection opened successfully");

        Ok(())
    }

    /// Close the driver and the underlying channel and transport.
    ///
    /// # Errors
    ///
    /// Can return an error if closing the channel fails. Can also return an error if the `on_close`
    /// callable is set and it returns an error.
    pub fn close(&mut self) -> Result<(), ScrapliError> {
        debug!(
            "closing connection to host {} on port {}",
            self.args.host, self.args.port
        );

        if let Some(f) = self.args.on_open {
            debug!("generic driver `on_close` set, executing");

            f(self)?;
        }

        self.channel.close()?;

        info!("connection closed successfully");

        Ok(())
    }

    /// Return the current "prompt" from the device.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying channel errored on the `get_prompt` call.
    ///
    /// # Panics
    ///
    /// Can panic if there is invalid utf-8 in the bytes in prompt byte vec returned from the
    /// channel.
    #[allow(clippy::expect_used)]
    pub fn get_prompt(&mut self) -> Result<String, ScrapliError> {
        match self.channel.get_prompt() {
            Ok(prompt_bytes) => {
                Ok(String::from_utf8(prompt_bytes).expect("invalid utf-8 in prompt"))
            }
            Err(err) => Err(ScrapliError {
                kind: err.kind(),
                details: format!("error fetching prompt from channel, error: {err}"),
            }),
        }
    }

    /// Send a command to the device.
    ///
    /// # Errors
    ///
    /// Returns a `ScrapliError` if something that cannot be recovered from occurs.
    pub fn send_command(
        &mut self,
        command: &str,
    ) -> Result<Response, ScrapliError> {
        let opts = &mut OperationOptions::default();
        opts.failed_when_contains = self.args.failed_when_contains.clone();

        self.send_command_with_options(command, opts)
    }

    /// Send a command to the device with optional options struct provided.
    ///
    /// # Errors
    ///
    /// Returns a `ScrapliError` if something that cannot be recovered from occurs.
    pub fn send_command_with_options(
        &mut self,
        command: &str,
        options: &OperationOptions,
    ) -> Result<Response, ScrapliError> {
        info!("send_command requested, sending '{}'", command);

        let opts = &mut options.clone();

        if options.failed_when_contains.is_empty() {
            opts.failed_when_contains = self.args.failed_when_contains.clone();
        }

        let mut resp = Response::new(
            command,
            self.args.host.as_str(),
            self.args.port,
            opts.failed_when_contains.clone(),
        );

        match self
            .channel
            .send_input(command, &opts.channel_operation_options)
        {
            Ok(rb) => {
                resp.record(rb);

                Ok(resp)
            }
            Err(err) => Err(err),
        }
    }

    /// Send a list of commands to the device.
    ///
    /// # Errors
    ///
    /// Returns a `ScrapliError` if something that cannot be recovered from occurs.
    pub fn send_commands(
        &mut self,
        commands: &[&str],
    ) -> Result<MultiResponse, ScrapliError> {
        let opts = &mut OperationOptions::default();
        opts.failed_when_contains = self.args.failed_when_contains.clone();

        self.send_commands_with_options(commands, opts)
    }

    /// Send a list of commands to the device.
    ///
    /// # Errors
    ///
    /// Returns a `ScrapliError` if something that cannot be recovered from occurs.
    #[allow(clippy::indexing_slicing)]
    pub fn send_commands_with_options(
        &mut self,
        commands: &[&str],
        options: &OperationOptions,
    ) -> Result<MultiResponse, ScrapliError> {
        if commands.is_empty() {
            return Err(ScrapliError {
                kind: ErrorKind::ValueError,
                details: String::from("send_commands called with empty vec of commands"),
            });
        }

        info!("send_commands requested, sending '{:?}'", commands);

        let mut multi_response = MultiResponse::new(self.args.host.as_str());

        for command in &commands[..commands.len() - 1] {
            let response = self.send_command_with_options(command, options)?;

            let failed = response.failed;

            multi_response.record_response(response);

            if options.stop_on_failed && failed {
                info!("stop on failed is true and a command failed, discontinuing send commands operation");

                return Ok(multi_response);
            }
        }

        let final_response =
            self.send_command_with_options(commands[commands.len() - 1], options)?;

        multi_response.record_response(final_response);

        Ok(multi_response)
    }

    /// Sends a command and reads until the prompt is seen, any of `expected_outputs` is seen in the
    /// accumulated output, or `read_duration` elapses -- whichever happens first. Running out of
    /// `read_duration` without seeing the prompt is *not* treated as a failure.
    ///
    /// # Errors
    ///
    /// Returns a `ScrapliError` if the underlying channel encounters an error, or if
    /// `timeout_ops` elapses first.
    pub fn send_and_read(
        &mut self,
        command: &str,
        expected_outputs: &[String],
        read_duration: Option<Duration>,
    ) -> Result<Response, ScrapliError> {
        info!(
            "send_and_read requested, sending '{}', expecting one of {:?}",
            command, expected_outputs
        );

        let mut resp = Response::new(
            command,
            self.args.host.as_str(),
            self.args.port,
            self.args.failed_when_contains.clone(),
        );

        let rb = self.channel.send_input_and_read(
            command,
            expected_outputs,
            read_duration,
            &ChannelOperationOptions::default(),
        )?;

        resp.record(rb);

        Ok(resp)
    }

    /// Send the interactive `events` to the device and return a `Response` capturing the whole
    /// conversation.
    ///
    /// # Errors
    ///
    /// Returns a `ScrapliError` if something that cannot be recovered from occurs.
    pub fn send_interactive(
        &mut self,
        events: &crate::channel::SendInteractiveEvents,
    ) -> Result<Response, ScrapliError> {
        let input = events
            .0
            .iter()
            .map(|e| e.input.as_str())
            .collect::<Vec<&str>>()
            .join("; ");

        let mut resp = Response::new(
            input.as_str(),
            self.args.host.as_str(),
            self.args.port,
            self.args.failed_when_contains.clone(),
        );

        let rb = self
            .channel
            .send_interactive(events, &ChannelOperationOptions::default())?;

        resp.record(rb);

        Ok(resp)
    }
}

/// A trigger condition for a `ReadCallback`.
pub enum CallbackTrigger {
    /// Fire when the accumulated output contains this literal substring.
    Contains(String),
    /// Fire when the accumulated output matches this regex.
    Pattern(Regex),
}

/// `ReadCallback` describes one entry in a `read_callback` event table -- a trigger, a handler that
/// runs when the trigger fires, and flags controlling whether the loop continues after the handler
/// runs. Useful for devices that emit asynchronous/interactive prompts mid command (confirmation
/// banners, "are you sure? [y/n]") that don't fit the request/response model of `send_command`.
pub struct ReadCallback {
    /// The condition that fires this callback.
    pub trigger: CallbackTrigger,
    /// If true, this callback only fires once even if its trigger matches again later.
    pub one_shot: bool,
    /// If true, firing this callback ends the `read_callback` loop.
    pub complete: bool,
    /// If true, the accumulated output buffer is cleared after this callback fires.
    pub reset_output: bool,
    /// The handler invoked when the trigger fires; receives the driver (so it may itself call
    /// driver operations such as `channel.write`) and the output accumulated so far.
    pub handler: fn(&mut Driver, &[u8]) -> Result<(), ScrapliError>,
}

impl Driver {
    /// Runs an event loop reading from the channel and firing `callbacks` whenever their trigger
    /// matches the accumulated output. If `initial_input` is set, it is written (with a trailing
    /// return) before the loop starts. The loop ends when a `complete` callback fires, or fails with
    /// `OperationTimeout` if `read_timeout` elapses without any callback firing.
    ///
    /// # Errors
    ///
    /// Returns a `ScrapliError` if the underlying channel encounters an error, if a handler
    /// returns an error, or if `read_timeout` elapses without any `complete` callback firing.
    pub fn read_callback(
        &mut self,
        callbacks: &mut [ReadCallback],
        initial_input: Option<&str>,
        read_timeout: Option<Duration>,
    ) -> Result<(), ScrapliError> {
        if let Some(input) = initial_input {
            self.channel.write(input.as_bytes())?;
            self.channel.write_return()?;
        }

        let deadline = read_timeout.map(|d| {
            Utc::now()
                + ChronoDuration::from_std(d).unwrap_or_else(|_| ChronoDuration::zero())
        });

        let mut fired: Vec<bool> = vec![false; callbacks.len()];
        let mut output: Vec<u8> = vec![];

        loop {
            if let Some(deadline) = deadline {
                if deadline <= Utc::now() {
                    return Err(ScrapliError {
                        kind: ErrorKind::OperationTimeout,
                        details: String::from(
                            "timed out waiting for a read_callback trigger to fire",
                        ),
                    });
                }
            }

            let nb = self.channel.read()?;

            if !nb.is_empty() {
                output.extend_from_slice(&nb);
            }

            let read_delay = self.channel.args.read_delay;

            for (idx, cb) in callbacks.iter_mut().enumerate() {
                if cb.one_shot && fired[idx] {
                    continue;
                }

                let matched = match &cb.trigger {
                    CallbackTrigger::Contains(s) => {
                        String::from_utf8_lossy(output.as_slice()).contains(s.as_str())
                    }
                    CallbackTrigger::Pattern(r) => r.is_match(output.as_slice()),
                };

                if !matched {
                    continue;
                }

                fired[idx] = true;

                (cb.handler)(self, output.as_slice())?;

                if cb.reset_output {
                    output.clear();
                }

                if cb.complete {
                    return Ok(());
                }
            }

            thread::sleep(read_delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CallbackTrigger,
        Driver,
        ReadCallback,
    };
    use crate::channel::{
        Args as ChannelArgs,
        Channel,
    };
    use crate::driver::generic::driver::Args;
    use crate::errors::ScrapliError;
    use crate::util::fake_transport::FakeTransport;
    use core::time::Duration;

    fn new_driver(chunks: Vec<Vec<u8>>) -> Driver {
        let mut channel_args = ChannelArgs::default();
        channel_args.auth_bypass = true;

        let transport = FakeTransport::new(chunks);

        let channel = Channel::new(channel_args, transport);

        Driver::new(Args::new("fake"), channel)
    }

    #[test]
    fn send_command_strips_echo_and_prompt() {
        let mut driver = new_driver(vec![
            b"show version\n".to_vec(),
            b"IOS 16.12\n".to_vec(),
            b"rtr1#".to_vec(),
        ]);

        driver.open().expect("failed opening test driver");

        let resp = driver
            .send_command("show version")
            .expect("failed sending command");

        assert!(!resp.failed);
        assert_eq!(resp.input, "show version");
        assert_eq!(resp.result, "IOS 16.12");
    }

    #[test]
    fn send_command_with_options_detects_failed_when_contains() {
        let mut driver = new_driver(vec![
            b"badcmd\n".to_vec(),
            b"% Invalid input\n".to_vec(),
            b"rtr1#".to_vec(),
        ]);

        driver.open().expect("failed opening test driver");
        driver.args.failed_when_contains = vec![String::from("% Invalid")];

        let resp = driver
            .send_command("badcmd")
            .expect("failed sending command");

        assert!(resp.failed);
        assert!(resp.result.contains("% Invalid input"));
        assert!(resp.raise_for_status().is_err());
    }

    fn confirm_handler(
        d: &mut Driver,
        _output: &[u8],
    ) -> Result<(), ScrapliError> {
        d.channel.write(b"yes")?;
        d.channel.write_return()
    }

    #[test]
    fn read_callback_fires_on_contains_trigger_and_completes() {
        let mut driver = new_driver(vec![b"proceed? [y/n]: ".to_vec()]);

        driver.open().expect("failed opening test driver");

        let mut callbacks = vec![ReadCallback {
            trigger: CallbackTrigger::Contains(String::from("[y/n]")),
            one_shot: true,
            complete: true,
            reset_output: false,
            handler: confirm_handler,
        }];

        driver
            .read_callback(
                &mut callbacks,
                Some("reload"),
                Some(Duration::from_secs(2)),
            )
            .expect("read_callback should have completed via the confirm handler");
    }

    #[test]
    fn read_callback_times_out_when_no_trigger_fires() {
        let mut driver = new_driver(vec![b"nothing interesting here\n".to_vec()]);

        driver.open().expect("failed opening test driver");

        let mut callbacks = vec![ReadCallback {
            trigger: CallbackTrigger::Contains(String::from("never seen")),
            one_shot: true,
            complete: true,
            reset_output: false,
            handler: confirm_handler,
        }];

        let result = driver.read_callback(&mut callbacks, None, Some(Duration::from_millis(50)));

        assert!(result.is_err());
    }
}
