use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::config::MqttConfig;
use crate::joy::{JoyMessage, JoyTransport, TransportError};

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
    Failed,
    /// DISCONNECT handed to the network, waiting for the socket to drain
    Closing,
}

/// Publishes joystick messages as JSON on one MQTT topic
pub struct MqttTransport {
    client: AsyncClient,
    topic: String,
    endpoint: String,
}

/// Event loop task of one [`MqttTransport`]
///
/// Runs independently of the application shutdown token so a DISCONNECT
/// queued by [`JoyTransport::close`] still gets flushed.
pub struct MqttDriver {
    task: JoinHandle<()>,
    cancel: CancellationToken,
}

impl MqttDriver {
    /// Wait for the driver to end on its own after the transport was closed,
    /// then force it down once `grace` has passed.
    pub async fn finish(self, grace: Duration) {
        let MqttDriver { mut task, cancel } = self;
        if tokio::time::timeout(grace, &mut task).await.is_ok() {
            return;
        }
        debug!("MQTT driver still running after {:?}, cancelling", grace);
        cancel.cancel();
        let _ = task.await;
    }
}

impl MqttTransport {
    /// Create the client and start driving its event loop
    pub fn connect(config: &MqttConfig) -> Result<(Self, MqttDriver), TransportError> {
        if config.host.trim().is_empty() {
            return Err(TransportError::InvalidEndpoint("empty broker host".to_string()));
        }
        if config.topic.trim().is_empty() {
            return Err(TransportError::InvalidEndpoint("empty topic".to_string()));
        }

        let mut mqtt_options = MqttOptions::new(&config.client_id, &config.host, config.port);
        mqtt_options.set_keep_alive(Duration::from_secs(config.keep_alive_secs.max(1)));
        if let (Some(user), Some(pw)) = (&config.user, &config.pw) {
            mqtt_options.set_credentials(user.clone(), pw.clone());
        }

        let (client, eventloop) = AsyncClient::new(mqtt_options, config.queue_capacity.max(1));
        let endpoint = format!("mqtt://{}:{}/{}", config.host, config.port, config.topic);
        info!("Connecting MQTT transport to {}", endpoint);

        let reconnect_delay = Duration::from_millis(config.reconnect_delay_ms);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(drive_event_loop(eventloop, reconnect_delay, cancel.clone()));

        Ok((
            MqttTransport {
                client,
                topic: config.topic.clone(),
                endpoint,
            },
            MqttDriver { task, cancel },
        ))
    }
}

impl JoyTransport for MqttTransport {
    fn publish(&mut self, message: &JoyMessage) -> Result<(), TransportError> {
        let payload = message.to_json()?;
        self.client
            .try_publish(self.topic.as_str(), QoS::AtMostOnce, false, payload)
            .map_err(|e| TransportError::Rejected(e.to_string()))
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.client
            .try_disconnect()
            .map_err(|e| TransportError::Close(e.to_string()))
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

// Keeps the connection alive and flushes outgoing publishes. Ends once the
// DISCONNECT went out and the connection wound down, or when cancelled.
async fn drive_event_loop(
    mut eventloop: EventLoop,
    reconnect_delay: Duration,
    cancel: CancellationToken,
) {
    let mut connection_state = ConnectionState::Disconnected;
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = eventloop.poll() => event,
        };

        match event {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                info!("MQTT broker accepted connection: {:?}", ack.code);
                connection_state = ConnectionState::Connected;
            }
            Ok(Event::Incoming(Packet::Disconnect)) => {
                warn!("MQTT broker closed the connection");
                connection_state = ConnectionState::Disconnected;
            }
            Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                debug!("DISCONNECT sent to broker");
                connection_state = ConnectionState::Closing;
            }
            Ok(_) => {}
            // client dropped or socket closed after our DISCONNECT
            Err(e) if connection_state == ConnectionState::Closing => {
                debug!("MQTT connection closed: {}", e);
                break;
            }
            Err(e) => {
                if connection_state != ConnectionState::Failed {
                    warn!("MQTT connection error: {}", e);
                } else {
                    debug!("MQTT connection still failing: {}", e);
                }
                connection_state = ConnectionState::Failed;
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(reconnect_delay) => {}
                }
            }
        }
    }
    debug!("MQTT event loop stopped in state {:?}", connection_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::StateHandle;
    use crate::joy::BroadcasterHandle;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const DISCONNECT: [u8; 2] = [0xE0, 0x00];
    const CONNACK: [u8; 4] = [0x20, 0x02, 0x00, 0x00];

    // Accepts one client, acknowledges its CONNECT and records everything
    // after that until the client hangs up.
    async fn loopback_broker() -> (u16, JoinHandle<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let broker = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await.unwrap();
            socket.write_all(&CONNACK).await.unwrap();

            let mut received = Vec::new();
            loop {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => received.extend_from_slice(&buf[..n]),
                }
            }
            received
        });
        (port, broker)
    }

    #[tokio::test]
    async fn rejects_empty_endpoint() {
        let config = MqttConfig {
            host: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            MqttTransport::connect(&config),
            Err(TransportError::InvalidEndpoint(_))
        ));

        let config = MqttConfig {
            topic: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            MqttTransport::connect(&config),
            Err(TransportError::InvalidEndpoint(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_broker_driver_is_cancelled_after_grace() {
        let config = MqttConfig {
            // nothing listens here, the driver keeps failing and backing off
            host: "127.0.0.1".to_string(),
            port: 1,
            reconnect_delay_ms: 10,
            ..Default::default()
        };
        let (mut transport, driver) = MqttTransport::connect(&config).unwrap();
        assert_eq!(transport.describe(), "mqtt://127.0.0.1:1/joy");

        let message = JoyMessage::snapshot(
            &Default::default(),
            chrono::Utc::now(),
            crate::joy::FRAME_ID,
        );
        // queued locally even without a broker
        assert!(transport.publish(&message).is_ok());
        let _ = transport.close();

        tokio::time::timeout(Duration::from_secs(5), driver.finish(Duration::from_millis(100)))
            .await
            .expect("driver did not stop");
    }

    #[tokio::test]
    async fn shutdown_flushes_disconnect_to_broker() {
        let (port, broker) = loopback_broker().await;
        let config = MqttConfig {
            host: "127.0.0.1".to_string(),
            port,
            ..Default::default()
        };
        let (transport, driver) = MqttTransport::connect(&config).unwrap();

        let state = StateHandle::new();
        let shutdown = CancellationToken::new();
        let broadcaster =
            BroadcasterHandle::spawn(None, Box::new(transport), state.subscribe(), shutdown.clone())
                .unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        // same order as the application teardown
        shutdown.cancel();
        let stats = broadcaster.join().await;
        driver.finish(Duration::from_secs(2)).await;

        let received = tokio::time::timeout(Duration::from_secs(5), broker)
            .await
            .expect("broker never saw the connection end")
            .unwrap();
        assert!(stats.published > 0);
        assert!(
            received.ends_with(&DISCONNECT),
            "last bytes: {:02X?}",
            &received[received.len().saturating_sub(4)..]
        );
    }
}
