//! Recurrence expansion: turns a (template, repeat-rule) pair into the full
//! ordered batch of concrete occurrences.
//!
//! The expander is pure. It performs no I/O, reads no clock, and assigns no
//! identities; two calls with identical inputs produce identical batches.
//! Conflict checking and persistence happen downstream, against the whole
//! batch at once.

use chrono::{Datelike, Months, NaiveDate};
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{Frequency, Occurrence, RepeatEnd, RepeatRule, ScheduleDraft};

/// Hard cap on occurrences generated from a single request. Together with
/// [`MAX_SPAN_MONTHS`] this bounds expansion of rules that supply no usable
/// end condition; both limits stay in force for well-formed rules too, each
/// end policy only substituting its own bound.
pub const MAX_OCCURRENCES: usize = 200;

/// Hard cap on how far past the template date an expansion may walk, in
/// months.
pub const MAX_SPAN_MONTHS: u32 = 6;

pub struct RecurrenceExpander;

impl RecurrenceExpander {
    /// Expands a template into its concrete occurrences, ascending by date.
    ///
    /// Without a rule this emits exactly one occurrence on the template
    /// date. With a rule it walks the calendar day by day from the template
    /// date to the terminal bound, emitting an occurrence on each matching
    /// day. A weekly rule whose weekday set matches no day in range yields
    /// an empty batch; the caller treats that as a no-op create.
    ///
    /// `group_id` is stamped onto every emitted occurrence; pass `None` for
    /// one-off requests.
    pub fn expand(
        user_id: Uuid,
        draft: &ScheduleDraft,
        repeat: Option<&RepeatRule>,
        group_id: Option<Uuid>,
    ) -> Result<Vec<Occurrence>, CoreError> {
        draft.validate()?;

        let Some(rule) = repeat else {
            return Ok(vec![Self::materialize(user_id, draft, draft.date, group_id)]);
        };
        rule.validate()?;

        let terminal = match rule.end {
            RepeatEnd::OnDate(date) => date,
            _ => draft
                .date
                .checked_add_months(Months::new(MAX_SPAN_MONTHS))
                .ok_or_else(|| {
                    CoreError::InvalidInput(format!("template date {} out of range", draft.date))
                })?,
        };
        let max_count = match rule.end {
            RepeatEnd::AfterCount(count) => (count as usize).min(MAX_OCCURRENCES),
            _ => MAX_OCCURRENCES,
        };

        let mut occurrences = Vec::new();
        let mut day = draft.date;
        while day <= terminal && occurrences.len() < max_count {
            if Self::rule_matches(&rule.frequency, draft.date, day) {
                occurrences.push(Self::materialize(user_id, draft, day, group_id));
            }
            let Some(next) = day.succ_opt() else { break };
            day = next;
        }

        Ok(occurrences)
    }

    /// Whether `day` belongs to the pattern anchored at `start`. Days before
    /// the anchor never match; the walk starts there, so the guard only
    /// matters for direct callers.
    fn rule_matches(frequency: &Frequency, start: NaiveDate, day: NaiveDate) -> bool {
        if day < start {
            return false;
        }
        match frequency {
            Frequency::Weekly { weekdays } => weekdays.contains(&day.weekday()),
            Frequency::Daily { interval } => {
                let elapsed = (day - start).num_days();
                elapsed % (*interval as i64) == 0
            }
        }
    }

    fn materialize(
        user_id: Uuid,
        draft: &ScheduleDraft,
        date: NaiveDate,
        group_id: Option<Uuid>,
    ) -> Occurrence {
        let span = draft.span_on(date);
        Occurrence {
            user_id,
            project_id: draft.project_id,
            recurring_group_id: group_id,
            kind: draft.kind,
            title: draft.title.clone(),
            content: draft.content.clone(),
            start_time: span.start,
            end_time: span.end,
        }
    }
}
