//! One-shot "configuration ready" channel carrying the display allow-list.
//!
//! The sender side belongs to whoever loads project settings; the receiver
//! is polled by the table session, which never blocks on it.

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use equiptab_core::config::DisplaySettings;

use crate::error::ExecError;

pub fn config_channel() -> (ConfigSender, ConfigReceiver) {
    let (tx, rx) = oneshot::channel();
    (ConfigSender { tx }, ConfigReceiver { inner: Some(rx) })
}

#[derive(Debug)]
pub struct ConfigSender {
    tx: oneshot::Sender<Vec<String>>,
}

impl ConfigSender {
    /// Deliver the allow-list. Fails if the receiver is gone.
    pub fn send(self, allow_list: Vec<String>) -> Result<(), ExecError> {
        self.tx
            .send(allow_list)
            .map_err(|_| ExecError::ConfigChannel("receiver dropped".into()))
    }

    pub fn send_settings(self, settings: &DisplaySettings) -> Result<(), ExecError> {
        self.send(settings.allow_list())
    }
}

#[derive(Debug)]
pub struct ConfigReceiver {
    inner: Option<oneshot::Receiver<Vec<String>>>,
}

impl ConfigReceiver {
    /// Non-blocking check. `Ok(None)` while nothing has arrived and after
    /// the value has been taken.
    pub fn try_recv(&mut self) -> Result<Option<Vec<String>>, ExecError> {
        let Some(rx) = self.inner.as_mut() else {
            return Ok(None);
        };
        match rx.try_recv() {
            Ok(list) => {
                self.inner = None;
                Ok(Some(list))
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Closed) => {
                self.inner = None;
                Err(ExecError::ConfigChannel(
                    "sender dropped without sending".into(),
                ))
            }
        }
    }

    /// True once the value was taken or the sender is known to be gone.
    pub fn is_terminated(&self) -> bool {
        self.inner.is_none()
    }

    pub async fn recv(self) -> Result<Vec<String>, ExecError> {
        let rx = self
            .inner
            .ok_or_else(|| ExecError::ConfigChannel("already received".into()))?;
        rx.await
            .map_err(|_| ExecError::ConfigChannel("sender dropped without sending".into()))
    }
}
