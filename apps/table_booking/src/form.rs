//! Interactive, line-oriented rendition of the booking form.

use std::io::Write;

use anyhow::Result;
use client_core::{BookingFormController, SubmitOutcome};
use shared::domain::{BookingDraft, FormField, FormSnapshot};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::terminal::{render_field_errors, render_slots, resolve_time_choice};

pub struct FormSession<'a, R> {
    controller: &'a BookingFormController,
    lines: Lines<R>,
}

impl<'a, R: AsyncBufRead + Unpin> FormSession<'a, R> {
    pub fn new(controller: &'a BookingFormController, reader: R) -> Self {
        Self {
            controller,
            lines: reader.lines(),
        }
    }

    /// Walks the inputs until the backend accepts a booking. `None` when input ends first.
    ///
    /// After a validation failure only the flagged fields are asked again; after a
    /// rejected submission every field is offered with its previous value.
    pub async fn run(&mut self, out: &mut impl Write) -> Result<Option<BookingDraft>> {
        let mut draft = FormSnapshot::default();
        let mut pending = FormField::ALL.to_vec();

        loop {
            for &field in &pending {
                if !self.fill(out, field, &mut draft).await? {
                    return Ok(None);
                }
            }

            match self.controller.handle_submit(draft.clone()).await {
                SubmitOutcome::Booked(booked) => {
                    writeln!(out, "Table booked.")?;
                    return Ok(Some(booked));
                }
                SubmitOutcome::Invalid(errors) => {
                    writeln!(out, "{}", render_field_errors(&errors))?;
                    pending = errors.fields();
                }
                SubmitOutcome::Failed { .. } => {
                    writeln!(out, "Booking was not accepted; press enter to keep a value.")?;
                    pending = FormField::ALL.to_vec();
                }
            }
        }
    }

    async fn fill(
        &mut self,
        out: &mut impl Write,
        field: FormField,
        draft: &mut FormSnapshot,
    ) -> Result<bool> {
        if field == FormField::Time {
            let state = self.controller.state().await;
            writeln!(out, "{}", render_slots(&state))?;
        }

        let Some(value) = self.ask(out, field, draft.value(field)).await? else {
            return Ok(false);
        };

        let value = match field {
            FormField::Date => {
                self.controller.select_date(value.trim()).await;
                value.trim().to_string()
            }
            FormField::Time => {
                let state = self.controller.state().await;
                resolve_time_choice(&value, &state.available_times)
            }
            _ => value,
        };
        draft.set(field, value);
        Ok(true)
    }

    async fn ask(
        &mut self,
        out: &mut impl Write,
        field: FormField,
        current: &str,
    ) -> Result<Option<String>> {
        if current.is_empty() {
            write!(out, "{}: ", field.label())?;
        } else {
            write!(out, "{} [{current}]: ", field.label())?;
        }
        out.flush()?;

        let Some(line) = self.lines.next_line().await? else {
            return Ok(None);
        };
        if line.trim().is_empty() {
            return Ok(Some(current.to_string()));
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
