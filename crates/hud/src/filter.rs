//! Search and zero-rating filter for overlay lists.

use crate::entity::Skill;
use crate::model::DisplayItem;

/// A row the overlay's search box can filter.
pub trait FilterRow {
	fn display_name(&self) -> &str;
	/// Rating or quantity; rows without one count as zero.
	fn rating(&self) -> i64;
}

impl FilterRow for DisplayItem {
	fn display_name(&self) -> &str {
		&self.name
	}

	fn rating(&self) -> i64 {
		self.quantity.unwrap_or(0)
	}
}

impl FilterRow for Skill {
	fn display_name(&self) -> &str {
		self.display_name
			.as_deref()
			.or(self.name.as_deref())
			.or(self.label.as_deref())
			.unwrap_or_default()
	}

	fn rating(&self) -> i64 {
		self.value
	}
}

/// Whether a row passes a case-insensitive substring query and the zero filter.
pub fn matches<R: FilterRow + ?Sized>(row: &R, query: &str, hide_zero: bool) -> bool {
	if hide_zero && row.rating() <= 0 {
		return false;
	}
	query.is_empty() || row.display_name().to_lowercase().contains(&query.to_lowercase())
}

/// Rows passing [`matches`], in input order.
pub fn retain_matching<'a, R, I>(rows: I, query: &str, hide_zero: bool) -> Vec<&'a R>
where
	R: FilterRow + 'a,
	I: IntoIterator<Item = &'a R>,
{
	let query = query.trim();
	rows.into_iter().filter(|row| matches(*row, query, hide_zero)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{ItemCapability, ItemSource};

	fn item(name: &str, quantity: Option<i64>) -> DisplayItem {
		DisplayItem {
			id: name.to_lowercase(),
			name: name.to_string(),
			label: "Gear".to_string(),
			type_code: "equipment".to_string(),
			portrait: String::new(),
			quantity,
			source: ItemSource::Native {
				capability: Some(ItemCapability::PostCard),
			},
		}
	}

	fn skill(display: &str, value: i64) -> Skill {
		Skill {
			display_name: Some(display.to_string()),
			value,
			..Skill::default()
		}
	}

	#[test]
	fn query_is_case_insensitive_substring() {
		let rows = [item("Medkit", Some(1)), item("Commlink", Some(1)), item("Stim Patch", Some(3))];
		let hits = retain_matching(&rows, "  MED ", false);
		assert_eq!(hits.len(), 1);
		assert_eq!(hits[0].name, "Medkit");
	}

	#[test]
	fn empty_query_keeps_everything() {
		let rows = [item("A", None), item("B", Some(0))];
		assert_eq!(retain_matching(&rows, "", false).len(), 2);
	}

	#[test]
	fn hide_zero_drops_unrated_rows() {
		let skills = [skill("Pistols", 6), skill("Archery", 0), skill("Sneaking", 4)];
		let hits: Vec<_> = retain_matching(&skills, "", true).into_iter().map(|s| s.display_name()).collect();
		assert_eq!(hits, ["Pistols", "Sneaking"]);

		let rows = [item("Ammo", None)];
		assert!(retain_matching(&rows, "", true).is_empty());
	}

	#[test]
	fn skill_name_falls_back_to_custom_name_then_label() {
		let custom = Skill {
			name: Some("Street Rumors".to_string()),
			..Skill::default()
		};
		assert_eq!(custom.display_name(), "Street Rumors");
		let labelled = Skill {
			label: Some("SR5.SkillPistols".to_string()),
			..Skill::default()
		};
		assert_eq!(labelled.display_name(), "SR5.SkillPistols");
	}
}
