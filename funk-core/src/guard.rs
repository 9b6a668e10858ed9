//! Scoped Ownership für GPIO-Leitungen
//!
//! Eine [`LineGuard`] hält eine angeforderte Leitung und gibt sie in jedem
//! Fall wieder frei, auch wenn die Übertragung mit `?` vorzeitig abbricht.

use crate::error::TransmitError;
use crate::traits::GpioService;
use crate::types::{Level, PinId};

/// Exklusiv belegte Ausgangsleitung
///
/// Eine Leitung, die zuletzt auf High stand oder auf High gesetzt werden
/// sollte, wird vor der Freigabe auf Low gezogen. So bleibt weder der Sender
/// noch die Versorgung nach einem Fehler eingeschaltet.
pub struct LineGuard<'g, G: GpioService> {
    gpio: &'g G,
    pin: PinId,
    line: Option<G::Line>,
    /// Letzter geschriebener oder versuchter High-Pegel
    level: Option<Level>,
}

impl<'g, G: GpioService> LineGuard<'g, G> {
    /// Fordert `pin` beim GPIO-Dienst an
    ///
    /// # Fehlerbehandlung
    /// Gibt `TransmitError::InvalidPin` zurück wenn der Pin nicht existiert
    /// oder bereits belegt ist.
    pub fn claim(gpio: &'g G, pin: PinId) -> Result<Self, TransmitError> {
        let line = gpio
            .acquire(pin)
            .map_err(|_| TransmitError::InvalidPin(pin))?;

        Ok(Self {
            gpio,
            pin,
            line: Some(line),
            level: None,
        })
    }

    pub fn configure_output(&mut self) -> Result<(), TransmitError> {
        let pin = self.pin;
        let line = self
            .line
            .as_mut()
            .ok_or(TransmitError::DirectionConfigFailed(pin))?;

        self.gpio
            .set_output(line)
            .map_err(|_| TransmitError::DirectionConfigFailed(pin))
    }

    pub fn write(&mut self, level: Level) -> Result<(), TransmitError> {
        let pin = self.pin;
        let line = self.line.as_mut().ok_or(TransmitError::WriteFailed(pin))?;

        // Ein fehlgeschlagenes High kann den Ausgang trotzdem gesetzt haben
        if level == Level::High {
            self.level = Some(Level::High);
        }

        self.gpio
            .write(line, level)
            .map_err(|_| TransmitError::WriteFailed(pin))?;
        self.level = Some(level);
        Ok(())
    }

    /// Gibt die Leitung explizit frei und meldet Fehler dabei
    pub fn release(mut self) -> Result<(), TransmitError> {
        if self.level == Some(Level::High) {
            self.write(Level::Low)?;
        }
        self.release_line()
    }

    fn release_line(&mut self) -> Result<(), TransmitError> {
        match self.line.take() {
            Some(line) => self
                .gpio
                .release(line)
                .map_err(|_| TransmitError::ReleaseFailed(self.pin)),
            None => Ok(()),
        }
    }
}

impl<G: GpioService> Drop for LineGuard<'_, G> {
    fn drop(&mut self) {
        if self.line.is_none() {
            return;
        }

        // Fehlerpfad: Best-Effort, der ursprüngliche Fehler geht an den Aufrufer
        if self.level == Some(Level::High) {
            let _ = self.write(Level::Low);
        }
        let _ = self.release_line();
    }
}
