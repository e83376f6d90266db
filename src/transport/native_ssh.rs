use crate::errors::{
    ErrorKind,
    ScrapliError,
};
use crate::transport::base::{
    InChannelAuthData,
    InChannelAuthType,
    Transport,
    TransportArgs,
    TransportSSHArgs,
};
use log::debug;
use ssh2::Session;
use std::io::{
    Read,
    Write,
};
use std::net::TcpStream;

/// The "native ssh" transport -- an in-process libssh2 (via the `ssh2` crate) backed transport, as
/// opposed to the `System` transport which shells out to the `ssh` binary. Useful in environments
/// where no system ssh binary is available, or where avoiding a subprocess/pty is preferable.
pub struct NativeSSH {
    args: TransportArgs,
    ssh_args: TransportSSHArgs,
    session: Option<Session>,
    channel: Option<ssh2::Channel>,
}

impl NativeSSH {
    /// Returns a new `NativeSSH` instance.
    #[must_use]
    pub const fn new(
        args: TransportArgs,
        ssh_args: TransportSSHArgs,
    ) -> Self {
        Self {
            args,
            ssh_args,
            session: None,
            channel: None,
        }
    }

    fn authenticate(
        &self,
        session: &Session,
    ) -> Result<(), ScrapliError> {
        if !self.ssh_args.private_key_path.is_empty() {
            let passphrase = if self.ssh_args.private_key_passphrase.is_empty() {
                None
            } else {
                Some(self.ssh_args.private_key_passphrase.as_str())
            };

            return session
                .userauth_pubkey_file(
                    self.args.user.as_str(),
                    None,
                    std::path::Path::new(self.ssh_args.private_key_path.as_str()),
                    passphrase,
                )
                .map_err(|err| ScrapliError {
                    kind: ErrorKind::AuthFailed,
                    details: format!("ssh public key authentication failed, error: {err}"),
                });
        }

        session
            .userauth_password(self.args.user.as_str(), self.args.password.as_str())
            .map_err(|err| ScrapliError {
                kind: ErrorKind::AuthFailed,
                details: format!("ssh password authentication failed, error: {err}"),
            })
    }

    fn verify_host_key(
        &self,
        session: &Session,
    ) -> Result<(), ScrapliError> {
        if !self.ssh_args.strict_key {
            return Ok(());
        }

        let mut known_hosts = session.known_hosts().map_err(|err| ScrapliError {
            kind: ErrorKind::ConnectionError,
            details: format!("failed initializing known hosts, error: {err}"),
        })?;

        if !self.ssh_args.known_hosts_file_path.is_empty() {
            known_hosts
                .read_file(
                    std::path::Path::new(self.ssh_args.known_hosts_file_path.as_str()),
                    ssh2::KnownHostFileKind::OpenSSH,
                )
                .map_err(|err| ScrapliError {
                    kind: ErrorKind::ConnectionError,
                    details: format!("failed reading known hosts file, error: {err}"),
                })?;
        }

        let (key, _key_type) = session.host_key().ok_or_else(|| ScrapliError {
            kind: ErrorKind::ConnectionError,
            details: String::from("no host key presented by remote during handshake"),
        })?;

        match known_hosts.check(self.args.host.as_str(), key) {
            ssh2::CheckResult::Match => Ok(()),
            ssh2::CheckResult::NotFound if self.ssh_args.known_hosts_file_path.is_empty() => {
                // no known hosts file configured to check against -- nothing to compare to
                Ok(())
            }
            result => Err(ScrapliError {
                kind: ErrorKind::ConnectionError,
                details: format!("ssh host key verification failed, result: {result:?}"),
            }),
        }
    }
}

impl Transport for NativeSSH {
    fn open(&mut self) -> Result<(), ScrapliError> {
        debug!(
            "opening native ssh transport to host '{}' port '{}'",
            self.args.host, self.args.port
        );

        let tcp = TcpStream::connect((self.args.host.as_str(), self.args.port)).map_err(|err| {
            ScrapliError {
                kind: ErrorKind::ConnectionError,
                details: format!("failed opening tcp connection for native ssh transport, error: {err}"),
            }
        })?;

        tcp.set_nodelay(true).map_err(|err| ScrapliError {
            kind: ErrorKind::ConnectionError,
            details: format!("failed setting tcp nodelay, error: {err}"),
        })?;

        let mut session = Session::new().map_err(|err| ScrapliError {
            kind: ErrorKind::ConnectionError,
            details: format!("failed creating ssh session, error: {err}"),
        })?;

        session.set_tcp_stream(tcp);

        session.handshake().map_err(|err| ScrapliError {
            kind: ErrorKind::ConnectionError,
            details: format!("ssh handshake failed, error: {err}"),
        })?;

        self.verify_host_key(&session)?;

        self.authenticate(&session)?;

        let mut channel = session.channel_session().map_err(|err| ScrapliError {
            kind: ErrorKind::ConnectionError,
            details: format!("failed opening ssh channel session, error: {err}"),
        })?;

        channel
            .request_pty(
                "xterm",
                None,
                Some((self.args.term_width.into(), self.args.term_height.into(), 0, 0)),
            )
            .map_err(|err| ScrapliError {
                kind: ErrorKind::ConnectionError,
                details: format!("failed requesting pty on ssh channel, error: {err}"),
            })?;

        channel.shell().map_err(|err| ScrapliError {
            kind: ErrorKind::ConnectionError,
            details: format!("failed starting shell on ssh channel, error: {err}"),
        })?;

        session.set_blocking(false);

        self.session = Some(session);
        self.channel = Some(channel);

        Ok(())
    }

    fn close(&mut self) -> Result<(), ScrapliError> {
        let channel = match self.channel.as_mut() {
            None => {
                return Err(ScrapliError {
                    kind: ErrorKind::NotOpened,
                    details: String::from("trying to close transport with no channel created"),
                })
            }
            Some(channel) => channel,
        };

        channel.close().map_err(|err| ScrapliError {
            kind: ErrorKind::ConnectionError,
            details: format!("failed closing ssh channel, error: {err}"),
        })?;

        self.channel = None;
        self.session = None;

        Ok(())
    }

    fn alive(&mut self) -> bool {
        self.channel
            .as_ref()
            .map_or(false, |channel| !channel.eof())
    }

    fn read(&mut self) -> Result<Vec<u8>, ScrapliError> {
        self.read_n(self.args.read_size)
    }

    fn read_n(
        &mut self,
        n: u16,
    ) -> Result<Vec<u8>, ScrapliError> {
        let mut b = vec![0_u8; n as usize];

        let channel = match self.channel.as_mut() {
            None => {
                return Err(ScrapliError {
                    kind: ErrorKind::NotOpened,
                    details: String::from("attempting to read from transport with no channel!"),
                })
            }
            Some(channel) => channel,
        };

        match channel.read(b.as_mut_slice()) {
            Ok(read_n) => {
                b.truncate(read_n);

                Ok(b)
            }
            Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => Ok(vec![]),
            Err(err) => Err(ScrapliError {
                kind: ErrorKind::ConnectionError,
                details: format!("error while reading from native ssh transport, error: {err}"),
            }),
        }
    }

    fn write(
        &mut self,
        b: &[u8],
    ) -> Result<(), ScrapliError> {
        let channel = match self.channel.as_mut() {
            None => {
                return Err(ScrapliError {
                    kind: ErrorKind::NotOpened,
                    details: String::from("attempting to write to transport with no channel!"),
                })
            }
            Some(channel) => channel,
        };

        channel.write_all(b).map_err(|err| ScrapliError {
            kind: ErrorKind::ConnectionError,
            details: format!("failed writing to native ssh transport, error: {err}"),
        })?;

        channel.flush().map_err(|err| ScrapliError {
            kind: ErrorKind::ConnectionError,
            details: format!("failed flushing native ssh transport, error: {err}"),
        })
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
            private_key_passphrase: self.ssh_args.private_key_passphrase.clone(),
        }
    }
}
