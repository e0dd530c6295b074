// File: src/form.rs
// Purpose: Bind a field provider to a validator; the host calls `after_update` to re-validate

use tokio::sync::watch;

use crate::error::ValidationError;
use crate::field::Fields;
use crate::runner::FormValidator;
use crate::status::FormStatus;
use crate::store::Store;

/// A form whose fields come from a provider closure
///
/// The UI layer calls [`Form::after_update`] after every render or state
/// change it cares about. Each call is one full, synchronous pass; nothing
/// is debounced or coalesced.
#[derive(Debug)]
pub struct Form<P> {
    validator: FormValidator,
    provider: P,
}

impl<P> Form<P>
where
    P: Fn() -> Fields,
{
    pub fn new(validator: FormValidator, provider: P) -> Self {
        Self {
            validator,
            provider,
        }
    }

    /// Re-validate the provider's current snapshot and publish the result
    pub fn after_update(&self) -> Result<FormStatus, ValidationError> {
        self.validator.run(&self.provider)
    }

    pub fn status(&self) -> &Store<FormStatus> {
        self.validator.status()
    }

    pub fn fields(&self) -> &Store<Fields> {
        self.validator.fields()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormStatus> {
        self.validator.status().subscribe()
    }

    pub fn validator(&self) -> &FormValidator {
        &self.validator
    }
}

/// Bind `provider` to a validator with the built-in rules
///
/// The status store starts out as `{ fields: {}, values: {}, valid: true }`
/// until the first [`Form::after_update`].
pub fn validator<P>(provider: P) -> Form<P>
where
    P: Fn() -> Fields,
{
    Form::new(FormValidator::with_builtins(), provider)
}
