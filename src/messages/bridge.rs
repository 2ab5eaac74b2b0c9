use std::io::{self, BufRead, Write};
use std::thread::{Builder, JoinHandle};

use crate::messages::{Intent, Notification};
use crossbeam_channel as cbc;
use log::{debug, error, info};

/**
 * Carries messages across the process boundary.
 *
 * Two named threads are spawned: one decodes JSON intents line by line from
 * `input` and forwards them to the car controller, the other encodes every
 * notification from the controller as one JSON line on `output`.
 *
 * # Fields
 * - `intent_thread`:           Reader thread, returns once `input` hits end of file.
 * - `notification_thread`:     Writer thread, returns once the controller drops its sender.
 *
 * # Constructor arguments
 * - `input`:                   Source of JSON intents.
 * - `output`:                  Sink for JSON notifications.
 * - `intent_tx`:               Sender for decoded intents.
 * - `notification_rx`:         Receiver for notifications to encode.
 */
pub struct Bridge {
    intent_thread: JoinHandle<()>,
    notification_thread: JoinHandle<()>,
}

impl Bridge {
    pub fn new<R, W>(
        input: R,
        output: W,
        intent_tx: cbc::Sender<Intent>,
        notification_rx: cbc::Receiver<Notification>,
    ) -> io::Result<Bridge>
    where
        R: BufRead + Send + 'static,
        W: Write + Send + 'static,
    {
        // Thread for reading intents
        let intent_thread = Builder::new()
            .name("intent_rx".into())
            .spawn(move || {
                if let Err(e) = forward_intents(input, &intent_tx) {
                    error!("Failed to read intents: {}", e);
                }
            })?;

        // Thread for writing notifications
        let notification_thread = Builder::new()
            .name("event_sink".into())
            .spawn(move || {
                if let Err(e) = forward_notifications(&notification_rx, output) {
                    error!("Failed to write notifications: {}", e);
                }
            })?;

        Ok(Bridge {
            intent_thread,
            notification_thread,
        })
    }

    /// Waits for both threads to finish.
    pub fn join(self) {
        if self.intent_thread.join().is_err() {
            error!("Intent reader thread panicked");
        }
        if self.notification_thread.join().is_err() {
            error!("Event sink thread panicked");
        }
    }
}

/// Decodes every non-empty line of `input` and sends it on. Returns at end of input.
pub fn forward_intents<R: BufRead>(input: R, intent_tx: &cbc::Sender<Intent>) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let intent = Intent::from_json(line);
        debug!("Intent received: {:?}", intent);
        if intent_tx.send(intent).is_err() {
            info!("Car controller gone, no longer reading intents");
            break;
        }
    }
    Ok(())
}

/// Writes each notification as a JSON line until the channel closes.
pub fn forward_notifications<W: Write>(
    notification_rx: &cbc::Receiver<Notification>,
    mut output: W,
) -> io::Result<()> {
    for notification in notification_rx.iter() {
        let line = notification.to_json()?;
        writeln!(output, "{}", line)?;
        output.flush()?;
    }
    Ok(())
}

/***************************************/
/*             Unit tests              */
/***************************************/
