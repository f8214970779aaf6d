//! Recurrence expansion - concrete publish times of a repeating post

use time::{Date, PrimitiveDateTime};

use crate::model::{DayOfWeek, PostBody, RecurrenceRule};

/// Publish times of `body` inside `[window_start, window_end)`.
///
/// The post's own `scheduled_at` is the first occurrence; repeats follow it
/// until `recurrence_end_date` (inclusive). Monthly repeats skip months that
/// lack the anchor's day. At most `max` instants are returned.
pub fn occurrences(
    body: &PostBody,
    window_start: PrimitiveDateTime,
    window_end: PrimitiveDateTime,
    max: usize,
) -> Vec<PrimitiveDateTime> {
    let Some(anchor) = body.scheduled_at else {
        return Vec::new();
    };
    let in_window = |at: PrimitiveDateTime| at >= window_start && at < window_end;

    if !body.recurring || body.recurrence_rule == RecurrenceRule::None {
        return if in_window(anchor) && max > 0 {
            vec![anchor]
        } else {
            Vec::new()
        };
    }

    let first = anchor.date().max(window_start.date());
    let mut last = window_end.date();
    if let Some(end) = body.recurrence_end_date {
        last = last.min(end);
    }

    let mut found = Vec::new();
    let mut cursor = Some(first);
    while let Some(date) = cursor {
        if date > last || found.len() >= max {
            break;
        }
        let at = date.with_time(anchor.time());
        if at >= anchor && in_window(at) && repeats_on(body, anchor.date(), date) {
            found.push(at);
        }
        cursor = date.next_day();
    }

    tracing::trace!(
        rule = ?body.recurrence_rule,
        count = found.len(),
        "Expanded recurrence"
    );

    found
}

fn repeats_on(body: &PostBody, anchor: Date, date: Date) -> bool {
    if date == anchor {
        return true;
    }
    match body.recurrence_rule {
        RecurrenceRule::None => false,
        RecurrenceRule::Daily => true,
        RecurrenceRule::Weekly => (date - anchor).whole_days() % 7 == 0,
        RecurrenceRule::Monthly => date.day() == anchor.day(),
        RecurrenceRule::Custom => body
            .recurrence_days
            .contains(&DayOfWeek::from(date.weekday())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn body(rule: RecurrenceRule, days: &[DayOfWeek]) -> PostBody {
        PostBody::new("Weekly tips", "Body")
            .scheduled_for(datetime!(2026-01-31 09:00))
            .repeating(rule, days.iter().copied())
    }

    const FROM: PrimitiveDateTime = datetime!(2026-01-01 00:00);
    const TO: PrimitiveDateTime = datetime!(2026-06-01 00:00);

    #[test]
    fn test_non_recurring_yields_anchor_only() {
        let body = body(RecurrenceRule::None, &[]);
        assert_eq!(occurrences(&body, FROM, TO, 10), vec![datetime!(2026-01-31 09:00)]);
        assert!(occurrences(&body, datetime!(2026-02-01 00:00), TO, 10).is_empty());
    }

    #[test]
    fn test_daily_respects_max() {
        let body = body(RecurrenceRule::Daily, &[]);
        let found = occurrences(&body, FROM, TO, 3);
        assert_eq!(
            found,
            vec![
                datetime!(2026-01-31 09:00),
                datetime!(2026-02-01 09:00),
                datetime!(2026-02-02 09:00),
            ]
        );
    }

    #[test]
    fn test_weekly_steps_seven_days_from_window_start() {
        let body = body(RecurrenceRule::Weekly, &[]);
        let found = occurrences(&body, datetime!(2026-02-10 00:00), TO, 2);
        assert_eq!(
            found,
            vec![datetime!(2026-02-14 09:00), datetime!(2026-02-21 09:00)]
        );
    }

    #[test]
    fn test_monthly_skips_short_months() {
        let body = body(RecurrenceRule::Monthly, &[]);
        let found = occurrences(&body, FROM, TO, 10);
        assert_eq!(
            found,
            vec![
                datetime!(2026-01-31 09:00),
                datetime!(2026-03-31 09:00),
                datetime!(2026-05-31 09:00),
            ]
        );
    }

    #[test]
    fn test_custom_days_and_end_date() {
        let mut body = body(RecurrenceRule::Custom, &[DayOfWeek::Monday, DayOfWeek::Wednesday]);
        body.recurrence_end_date = Some(date!(2026 - 02 - 09));

        let found = occurrences(&body, FROM, TO, 10);
        assert_eq!(
            found,
            vec![
                datetime!(2026-01-31 09:00),
                datetime!(2026-02-02 09:00),
                datetime!(2026-02-04 09:00),
                datetime!(2026-02-09 09:00),
            ]
        );
    }

    #[test]
    fn test_unscheduled_post_has_no_occurrences() {
        let body =
            PostBody::new("Idea", "Body").repeating(RecurrenceRule::Daily, Vec::<DayOfWeek>::new());
        assert!(occurrences(&body, FROM, TO, 10).is_empty());
    }
}
