use rondo_types::InfoCategory;

use super::dup::{dup_slice, Duplicate};
use super::ItemState;
use crate::ControlError;

impl ItemState {
    fn category_mut(&mut self, name: &str) -> Option<&mut InfoCategory> {
        self.info.iter_mut().find(|c| c.name == name)
    }

    /// Set one info line, creating the category if needed.
    pub fn add_info(&mut self, category: &str, name: &str, value: &str) -> Result<(), ControlError> {
        if self.category_mut(category).is_none() {
            self.info.try_reserve(1)?;
            self.info.push(InfoCategory::new(category));
        }
        if let Some(cat) = self.category_mut(category) {
            cat.upsert(name, value);
        }
        Ok(())
    }

    /// Replace the category of the same name wholesale, or append it.
    pub fn replace_infos(&mut self, category: &InfoCategory) -> Result<(), ControlError> {
        let copy = category.duplicate()?;
        match self.category_mut(&category.name) {
            Some(existing) => *existing = copy,
            None => {
                self.info.try_reserve(1)?;
                self.info.push(copy);
            }
        }
        Ok(())
    }

    /// Upsert every line of `category` into the category of the same name.
    pub fn merge_infos(&mut self, category: &InfoCategory) -> Result<(), ControlError> {
        if self.category_mut(&category.name).is_none() {
            return self.replace_infos(category);
        }
        if let Some(existing) = self.category_mut(&category.name) {
            for info in &category.infos {
                existing.upsert(&info.name, &info.value);
            }
        }
        Ok(())
    }

    /// Remove one line, or the whole category when `name` is `None`.
    pub fn del_info(&mut self, category: &str, name: Option<&str>) -> Result<(), ControlError> {
        let not_found = || match name {
            Some(n) => ControlError::NotFound(format!("info '{}/{}'", category, n)),
            None => ControlError::NotFound(format!("info category '{}'", category)),
        };
        match name {
            Some(n) => {
                let removed = self.category_mut(category).map(|c| c.remove(n)).unwrap_or(false);
                if removed {
                    Ok(())
                } else {
                    Err(not_found())
                }
            }
            None => {
                let index = self
                    .info
                    .iter()
                    .position(|c| c.name == category)
                    .ok_or_else(not_found)?;
                self.info.remove(index);
                Ok(())
            }
        }
    }

    pub fn info_snapshot(&self) -> Result<Vec<InfoCategory>, ControlError> {
        dup_slice(&self.info)
    }
}
