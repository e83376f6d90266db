use crate::errors::ScrapliError;
use crate::transport::base::{
    InChannelAuthData,
    InChannelAuthType,
    Transport,
    TransportArgs,
};
use std::collections::VecDeque;
use std::sync::{
    Arc,
    Mutex,
};

/// An in-process `Transport` double used by tests: `read_n` pops one scripted chunk per call
/// regardless of `n` (tests script output a "device reply" at a time rather than simulating
/// arbitrary packet fragmentation), `write` records everything sent so assertions can inspect what
/// the channel/driver actually sent to the "device". `written` is handed out as a shareable handle
/// (via `written_handle`) since the `FakeTransport` itself is moved into a `Channel` and becomes
/// unreachable from test code.
pub struct FakeTransport {
    args: TransportArgs,
    chunks: VecDeque<Vec<u8>>,
    written: Arc<Mutex<Vec<u8>>>,
    opened: bool,
}

impl FakeTransport {
    /// Returns a new `FakeTransport` that will yield `chunks`, in order, one per `read_n` call, then
    /// empty reads forever after.
    #[must_use]
    pub fn new(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            args: TransportArgs::new("fake"),
            chunks: chunks.into(),
            written: Arc::new(Mutex::new(vec![])),
            opened: false,
        }
    }

    /// Returns a cloneable handle onto the bytes written to this transport -- call this before
    /// moving the `FakeTransport` into a `Channel`.
    #[must_use]
    pub fn written_handle(&self) -> Arc<Mutex<Vec<u8>>> {
        Arc::clone(&self.written)
    }

    /// Pushes an additional scripted reply chunk onto the end of the read queue -- useful for
    /// scripting a reply driven by what the test has already observed being written.
    pub fn push_chunk(
        &mut self,
        b: Vec<u8>,
    ) {
        self.chunks.push_back(b);
    }
}

impl Transport for FakeTransport {
    fn open(&mut self) -> Result<(), ScrapliError> {
        self.opened = true;

        Ok(())
    }

    fn close(&mut self) -> Result<(), ScrapliError> {
        self.opened = false;

        Ok(())
    }

    fn alive(&mut self) -> bool {
        self.opened
    }

    fn read(&mut self) -> Result<Vec<u8>, ScrapliError> {
        self.read_n(self.args.read_size)
    }

    fn read_n(
        &mut self,
        _n: u16,
    ) -> Result<Vec<u8>, ScrapliError> {
        Ok(self.chunks.pop_front().unwrap_or_default())
    }

    fn write(
        &mut self,
        b: &[u8],
    ) -> Result<(), ScrapliError> {
        self.written
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .extend_from_slice(b);

        Ok(())
    }

    fn get_transport_args(self) -> TransportArgs {
        self.args
    }

    fn get_host(&self) -> String {
        self.args.host.clone()
    }

    fn get_port(&self) -> u16 {
        self.args.port
    }

    fn in_channel_auth_data(&self) -> InChannelAuthData {
        InChannelAuthData {
            auth_type: InChannelAuthType::SSH,
            user: self.args.user.clone(),
            password: self.args.password.clone(),
            private_key_passphrase: String::new(),
        }
    }
}
