// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native events (keyboard, file drag-drop) are routed to top-level
//! messages here; a periodic tick drives the spinner animation and
//! notification auto-dismiss, and only runs while something needs it.

use super::Message;
use iced::{event, keyboard, time, window, Subscription};
use std::time::Duration;

/// Routes window and keyboard events to application messages.
///
/// File hover/drop events feed the upload preview's drag-drop path.
/// Escape only fires when no widget captured the key press.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _window_id| match &event {
        event::Event::Window(window::Event::FileHovered(path)) => {
            Some(Message::FileHovered(path.clone()))
        }
        event::Event::Window(window::Event::FilesHoveredLeft) => {
            Some(Message::FilesHoveredLeft)
        }
        event::Event::Window(window::Event::FileDropped(path)) => {
            Some(Message::FileDropped(path.clone()))
        }
        event::Event::Keyboard(keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(keyboard::key::Named::Escape),
            ..
        }) => match status {
            event::Status::Ignored => Some(Message::EscapePressed),
            event::Status::Captured => None,
        },
        _ => None,
    })
}

/// Periodic tick while a request is in flight, the gallery is loading, or
/// notifications are on screen.
pub fn create_tick_subscription(busy: bool) -> Subscription<Message> {
    if busy {
        time::every(Duration::from_millis(100)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
