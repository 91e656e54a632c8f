//! Push buttons on the Raspberry Pi header.

use rppal::gpio::Gpio;
use rppal::gpio::InputPin;
use rppal::gpio::Trigger;

use crate::event::Event;
use crate::event::EventSender;

/// Keeps the button interrupts registered for as long as it lives.
#[derive(Debug)]
pub struct Buttons {
    _mode: InputPin,
    _shutdown: InputPin,
}

impl Buttons {
    pub fn setup(
        config: &crate::config::ButtonsConfig,
        event_sender: &EventSender,
    ) -> Result<Self, crate::error::Error> {
        let gpio = Gpio::new()?;

        let mode = button(
            &gpio,
            config.mode_pin,
            config.debounce,
            event_sender,
            Event::AdvanceMode,
        )?;
        let shutdown = button(
            &gpio,
            config.shutdown_pin,
            config.debounce,
            event_sender,
            Event::Shutdown,
        )?;

        tracing::info!(
            mode_pin = config.mode_pin,
            shutdown_pin = config.shutdown_pin,
            debounce = ?config.debounce,
            "Buttons ready"
        );

        Ok(Self {
            _mode: mode,
            _shutdown: shutdown,
        })
    }
}

fn button(
    gpio: &Gpio,
    pin: u8,
    debounce: std::time::Duration,
    event_sender: &EventSender,
    event: Event,
) -> Result<InputPin, crate::error::Error> {
    let mut input = gpio.get(pin)?.into_input_pullup();
    let event_sender = event_sender.clone();

    // called on the rppal interrupt thread
    input.set_async_interrupt(Trigger::RisingEdge, Some(debounce), move |_| {
        crate::event::post(&event_sender, event);
    })?;

    Ok(input)
}
