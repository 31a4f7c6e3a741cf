use crate::domain::types::Field;
use crate::forms::FieldErrors;
use crate::view::{Document, FormContext};

/// Writes field messages into the error slots of one form.
///
/// A message for a slot the page does not have is dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorPresenter {
    context: FormContext,
}

impl ErrorPresenter {
    pub fn new(context: FormContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> FormContext {
        self.context
    }

    pub fn show_error<D>(&self, ui: &mut D, field: &str, message: &str)
    where
        D: Document + ?Sized,
    {
        let Ok(known) = field.parse::<Field>() else {
            log::warn!("No error slot for {field} in {:?}", self.context);
            return;
        };
        match ui.error_slot(self.context, known) {
            Some(slot) => *slot = message.to_string(),
            None => log::warn!("No error slot for {field} in {:?}", self.context),
        }
    }

    pub fn show_errors<D>(&self, ui: &mut D, errors: &FieldErrors)
    where
        D: Document + ?Sized,
    {
        for (field, message) in errors.iter() {
            self.show_error(ui, field, message);
        }
    }

    pub fn clear_errors<D>(&self, ui: &mut D)
    where
        D: Document + ?Sized,
    {
        for field in Field::ALL {
            if let Some(slot) = ui.error_slot(self.context, field) {
                slot.clear();
            }
        }
    }
}
