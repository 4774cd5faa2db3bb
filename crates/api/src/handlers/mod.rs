//! REST-Handler Module

pub mod items;
pub mod journal;
pub mod lists;
pub mod notes;
pub mod users;

/// Pflichtfeld darf nicht leer oder nur Leerzeichen sein
pub(crate) fn pflichtfeld(wert: &str, name: &str) -> crate::ApiResult<()> {
    if wert.trim().is_empty() {
        return Err(crate::ApiError::ungueltige_anfrage(format!(
            "{name} ist ein Pflichtfeld"
        )));
    }
    Ok(())
}
