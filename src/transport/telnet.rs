use crate::errors::{
    ErrorKind,
    ScrapliError,
};
use crate::transport::base::{
    InChannelAuthData,
    InChannelAuthType,
    Transport,
    TransportArgs,
};
use log::debug;
use std::io::{
    Read,
    Write,
};
use std::net::TcpStream;
use std::time::Duration;

/// Interpret As Command -- marks the start of a telnet negotiation sequence.
const IAC: u8 = 255;
const DONT: u8 = 254;
const DO: u8 = 253;
const WONT: u8 = 252;
const WILL: u8 = 251;
const SB: u8 = 250;
const SE: u8 = 240;

const OPT_ECHO: u8 = 1;
const OPT_SGA: u8 = 3;

/// Poll interval used when checking the socket for readability -- mirrors the `System` transport's
/// poll-based non-blocking read.
const POLL_TIMEOUT: Duration = Duration::from_millis(5);

/// The "telnet" transport -- a raw `TcpStream` with inline IAC option negotiation. We always
/// respond `WONT`/`DONT` to negotiation requests except for echo and suppress-go-ahead, which we
/// agree to (most network device telnet servers expect the client to suppress local echo and
/// honor SGA). All negotiation bytes are stripped from the stream before being handed back to the
/// `Channel` -- the channel and higher layers never see raw IAC sequences.
pub struct Telnet {
    args: TransportArgs,
    stream: Option<TcpStream>,
}

impl Telnet {
    /// Returns a new `Telnet` instance.
    #[must_use]
    pub const fn new(args: TransportArgs) -> Self {
        Self { args, stream: None }
    }

    /// Strips IAC negotiation sequences from `b`, responding inline to any `DO`/`WILL` requests.
    /// Returns the "cleaned" application bytes with all telnet protocol bytes removed.
    fn process_iac(
        &mut self,
        b: &[u8],
    ) -> Result<Vec<u8>, ScrapliError> {
        let (cleaned, responses) = strip_iac_sequences(b);

        if !responses.is_empty() {
            self.write_raw(responses.as_slice())?;
        }

        Ok(cleaned)
    }

    fn write_raw(
        &mut self,
        b: &[u8],
    ) -> Result<(), ScrapliError> {
        let stream = match self.stream {
            None => {
                return Err(ScrapliError {
                    kind: ErrorKind::NotOpened,
                    details: String::from("attempting to write to transport with no stream!"),
                })
            }
            Some(ref mut stream) => stream,
        };

        stream.write_all(b).map_err(|err| ScrapliError {
            kind: ErrorKind::ConnectionError,
            details: format!("failed writing to telnet transport, error: {err}"),
        })
    }
}

impl Transport for Telnet {
    fn open(&mut self) -> Result<(), ScrapliError> {
        debug!(
            "opening telnet transport to host '{}' port '{}'",
            self.args.host, self.args.port
        );

        let stream =
            TcpStream::connect((self.args.host.as_str(), self.args.port)).map_err(|err| {
                ScrapliError {
                    kind: ErrorKind::ConnectionError,
                    details: format!("failed connecting telnet transport, error: {err}"),
                }
            })?;

        stream
            .set_read_timeout(Some(POLL_TIMEOUT))
            .map_err(|err| ScrapliError {
                kind: ErrorKind::ConnectionError,
                details: format!("failed setting telnet socket read timeout, error: {err}"),
            })?;

        stream.set_nodelay(true).map_err(|err| ScrapliError {
            kind: ErrorKind::ConnectionError,
            details: format!("failed setting telnet socket nodelay, error: {err}"),
        })?;

        self.stream = Some(stream);

        Ok(())
    }

    fn close(&mut self) -> Result<(), ScrapliError> {
        let stream = match self.stream.take() {
            None => {
                return Err(ScrapliError {
                    kind: ErrorKind::NotOpened,
                    details: String::from("trying to close transport with no stream created"),
                })
            }
            Some(stream) => stream,
        };

        stream.shutdown(std::net::Shutdown::Both).map_err(|err| ScrapliError {
            kind: ErrorKind::ConnectionError,
            details: format!("failed closing telnet transport, error: {err}"),
        })
    }

    fn alive(&mut self) -> bool {
        self.stream.is_some()
    }

    fn read(&mut self) -> Result<Vec<u8>, ScrapliError> {
        self.read_n(self.args.read_size)
    }

    fn read_n(
        &mut self,
        n: u16,
    ) -> Result<Vec<u8>, ScrapliError> {
        let mut b = vec![0_u8; n as usize];

        let stream = match self.stream {
            None => {
                return Err(ScrapliError {
                    kind: ErrorKind::NotOpened,
                    details: String::from("attempting to read from transport with no stream!"),
                })
            }
            Some(ref mut stream) => stream,
        };

        match stream.read(b.as_mut_slice()) {
            Ok(read_n) => {
                b.truncate(read_n);

                self.process_iac(b.as_slice())
            }
            Err(err)
                if err.kind() == std::io::ErrorKind::WouldBlock
                    || err.kind() == std::io::ErrorKind::TimedOut =>
            {
                Ok(vec![])
            }
            Err(err) => Err(ScrapliError {
                kind: ErrorKind::ConnectionError,
                details: format!("error while reading from telnet transport, error: {err}"),
            }),
        }
    }

    fn write(
        &mut self,
        b: &[u8],
    ) -> Result<(), ScrapliError> {
        self.write_raw(b)
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
            auth_type: InChannelAuthType::Telnet,
            user: self.args.user.clone(),
            password: self.args.password.clone(),
            private_key_passphrase: String::new(),
        }
    }
}

fn negotiation_response(
    option: u8,
    command: u8,
) -> Option<[u8; 3]> {
    match (command, option) {
        (DO, OPT_ECHO | OPT_SGA) => Some([IAC, WILL, option]),
        (DO, _) => Some([IAC, WONT, option]),
        (WILL, OPT_ECHO | OPT_SGA) => Some([IAC, DO, option]),
        (WILL, _) => Some([IAC, DONT, option]),
        _ => None,
    }
}

/// Strips all telnet IAC sequences out of `b`, returning `(cleaned, responses)` where `cleaned` is
/// the application data with every negotiation/subnegotiation byte removed, and `responses` is the
/// (possibly empty) bytes that should be written back to the peer to answer any `DO`/`WILL`
/// requests found.
fn strip_iac_sequences(b: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let mut cleaned = Vec::with_capacity(b.len());
    let mut responses: Vec<u8> = vec![];

    let mut i = 0;

    while i < b.len() {
        if b[i] != IAC {
            cleaned.push(b[i]);
            i += 1;
            continue;
        }

        if i + 1 >= b.len() {
            break;
        }

        let command = b[i + 1];

        match command {
            DO | DONT | WILL | WONT => {
                if i + 2 >= b.len() {
                    break;
                }

                let option = b[i + 2];

                if let Some(response) = negotiation_response(option, command) {
                    responses.extend_from_slice(&response);
                }

                i += 3;
            }
            SB => {
                // subnegotiation -- skip through to the terminating IAC SE
                let mut j = i + 2;

                while j + 1 < b.len() && !(b[j] == IAC && b[j + 1] == SE) {
                    j += 1;
                }

                i = j + 2;
            }
            IAC => {
                // escaped 0xff byte in the data stream
                cleaned.push(IAC);
                i += 2;
            }
            _ => {
                i += 2;
            }
        }
    }

    (cleaned, responses)
}

#[cfg(test)]
mod tests {
    use super::{
        strip_iac_sequences,
        DO,
        IAC,
        OPT_ECHO,
        OPT_SGA,
        SB,
        SE,
        WILL,
        WONT,
    };

    #[test]
    fn strip_iac_sequences_passes_through_plain_bytes() {
        let input = b"login: ";

        let (cleaned, responses) = strip_iac_sequences(input);

        assert_eq!(cleaned, input);
        assert!(responses.is_empty());
    }

    #[test]
    fn strip_iac_sequences_strips_do_and_agrees_to_echo() {
        let input = [IAC, DO, OPT_ECHO, b'x'];

        let (cleaned, responses) = strip_iac_sequences(&input);

        assert_eq!(cleaned, vec![b'x']);
        assert_eq!(responses, vec![IAC, WILL, OPT_ECHO]);
    }

    #[test]
    fn strip_iac_sequences_refuses_unknown_will_option() {
        let unknown_option = 42_u8;
        let input = [IAC, WILL, unknown_option];

        let (cleaned, responses) = strip_iac_sequences(&input);

        assert!(cleaned.is_empty());
        assert_eq!(responses, vec![IAC, WONT, unknown_option]);
    }

    #[test]
    fn strip_iac_sequences_skips_subnegotiation_blocks() {
        let mut input = vec![b'a', IAC, SB, 24, 0, b'x', b'y', IAC, SE, b'b'];

        let (cleaned, responses) = strip_iac_sequences(&input);

        assert_eq!(cleaned, vec![b'a', b'b']);
        assert!(responses.is_empty());

        input.clear();
    }

    #[test]
    fn strip_iac_sequences_unescapes_doubled_iac_bytes() {
        let input = [b'a', IAC, IAC, b'b'];

        let (cleaned, responses) = strip_iac_sequences(&input);

        assert_eq!(cleaned, vec![b'a', IAC, b'b']);
        assert!(responses.is_empty());
    }

    #[test]
    fn strip_iac_sequences_sgas_ok_but_sga_is_also_echo_class() {
        let input = [IAC, DO, OPT_SGA];

        let (_, responses) = strip_iac_sequences(&input);

        assert_eq!(responses, vec![IAC, WILL, OPT_SGA]);
    }
}
