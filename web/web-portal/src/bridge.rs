use portal_client::{MessageSlot, Ui, ViewUpdate};
use yew::html::Scope;

use crate::page::{PortalPage, PortalPageMsg};

/// Routes client output into the page's message loop. Dialog input is the
/// only thing answered synchronously, through `window.prompt`.
#[derive(Clone)]
pub struct PageUi {
    link: Scope<PortalPage>,
}

impl PageUi {
    pub fn new(link: Scope<PortalPage>) -> Self {
        Self { link }
    }
}

impl Ui for PageUi {
    fn notify(&self, message: &str) {
        self.link
            .send_message(PortalPageMsg::Notify(message.to_string()));
    }

    fn prompt(&self, label: &str, default: &str) -> Option<String> {
        let window = web_sys::window()?;
        match window.prompt_with_message_and_default(label, default) {
            Ok(answer) => answer,
            Err(e) => {
                log::error!("prompt error: {e:?}");
                None
            }
        }
    }

    fn set_message(&self, slot: MessageSlot, text: &str) {
        self.link.send_message(PortalPageMsg::Message {
            slot,
            text: text.to_string(),
        });
    }

    fn update(&self, update: ViewUpdate) {
        self.link.send_message(PortalPageMsg::View(update));
    }
}
