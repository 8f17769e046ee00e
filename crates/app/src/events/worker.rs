//! Event Worker

use std::sync::Arc;

use tokio::sync::mpsc::Receiver;
use tracing::{debug, warn};

use crate::{
    domain::notifications::{Email, NotificationsService},
    events::AppEvent,
};

const WELCOME_SUBJECT: &str = "Welcome to the Urban Sole Care, pal!";
const WELCOME_BODY: &str = "Hi there, we are happy to onboard you as our user!\n\
    Click here to complete your registration and officially become one of the urban folks!";

const PASSWORD_RESET_SUBJECT: &str = "Bad News, You are forgetting you password";
const PASSWORD_RESET_BODY: &str = "Hi there, we heard you are requesting to reset the password.\n\
    Use the code below to change your password mate. Cheers, have a great day!";

/// Drains the event channel and sends the matching notifications.
pub struct EventWorker {
    receiver: Receiver<AppEvent>,
    notifications: Arc<dyn NotificationsService>,
}

impl EventWorker {
    #[must_use]
    pub fn new(receiver: Receiver<AppEvent>, notifications: Arc<dyn NotificationsService>) -> Self {
        Self {
            receiver,
            notifications,
        }
    }

    /// Handle events until every [`EventBus`](crate::events::EventBus) has been dropped.
    pub async fn run(mut self) {
        debug!("event worker started");

        while let Some(event) = self.receiver.recv().await {
            self.handle(event).await;
        }

        debug!("event worker stopped");
    }

    #[tracing::instrument(name = "events.worker.handle", skip(self, event), fields(event = event.kind()))]
    async fn handle(&self, event: AppEvent) {
        let email = render(event);

        // Delivery is at most once; a failed send is only logged.
        if let Err(error) = self.notifications.send_email(email).await {
            warn!(%error, "failed to send notification");
        }
    }
}

fn render(event: AppEvent) -> Email {
    match event {
        AppEvent::UserRegistered { email, name } => {
            let greeting = name.map_or_else(String::new, |name| format!("{name}, "));

            Email {
                recipient: email,
                subject: WELCOME_SUBJECT.to_string(),
                body: format!("{greeting}{WELCOME_BODY}"),
            }
        }
        AppEvent::PasswordResetRequested { email, token_uid } => Email {
            recipient: email,
            subject: PASSWORD_RESET_SUBJECT.to_string(),
            body: format!("{PASSWORD_RESET_BODY}\n\n{token_uid}"),
        },
    }
}
