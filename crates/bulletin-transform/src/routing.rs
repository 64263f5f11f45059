//! Session-based routing of the ambiguous water-level column.

use bulletin_model::schema::{WATER_LEVEL_0800, WATER_LEVEL_1800};
use bulletin_model::{Session, Table};

use crate::coerce::{coerce_column_numeric, numeric_cell};

/// Time-slot a water-level reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSlot {
    Morning0800,
    Evening1800,
}

impl TimeSlot {
    pub fn column(self) -> &'static str {
        match self {
            TimeSlot::Morning0800 => WATER_LEVEL_0800,
            TimeSlot::Evening1800 => WATER_LEVEL_1800,
        }
    }
}

/// Routing configuration. The Unknown-session slot is a documented default
/// inherited from the source data, not an inferred rule, so it stays
/// overridable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingOptions {
    pub unknown_slot: TimeSlot,
}

impl Default for RoutingOptions {
    fn default() -> Self {
        Self {
            unknown_slot: TimeSlot::Morning0800,
        }
    }
}

/// Resolves the two time-slot fields. Explicit 0800/1800 columns win and are
/// coerced in place; otherwise a single column whose name mentions both
/// "water" and "level" is routed to the slot the session dictates. With no
/// candidate at all, both slots stay null.
pub fn route_water_levels(table: &mut Table, session: Session, options: RoutingOptions) {
    if table.has_column(WATER_LEVEL_0800) || table.has_column(WATER_LEVEL_1800) {
        for column in [WATER_LEVEL_0800, WATER_LEVEL_1800] {
            match table.column_index(column) {
                Some(index) => coerce_column_numeric(table, index),
                None => table.ensure_column(column),
            }
        }
        return;
    }

    let candidate = table.columns().iter().position(|name| {
        let lowered = name.to_lowercase();
        lowered.contains("water") && lowered.contains("level")
    });

    table.ensure_column(WATER_LEVEL_0800);
    table.ensure_column(WATER_LEVEL_1800);
    let Some(source_index) = candidate else {
        return;
    };

    let slot = match session {
        Session::Morning => TimeSlot::Morning0800,
        Session::Evening => TimeSlot::Evening1800,
        Session::Unknown => options.unknown_slot,
    };
    let Some(dest_index) = table.column_index(slot.column()) else {
        return;
    };
    for row in 0..table.height() {
        let value = numeric_cell(table.cell(row, source_index));
        table.set_cell(row, dest_index, value);
    }
}
