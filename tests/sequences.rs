use datespan::iter::{arrange, sequence, steps, Error};
use datespan::parse::parse;
use datespan::{Delta, Instant};


fn date(input: &str) -> Instant {
    parse(input).unwrap()
}


mod arranging {
    use super::*;

    #[test]
    fn count_plus_one_instants() {
        let dates = arrange(date("2024-12-27"), 5, &Delta::new().days(1)).unwrap();
        assert_eq!(dates.len(), 6);
        assert_eq!(dates.first(), Some(&date("2024-12-27")));
        assert_eq!(dates.last(), Some(&date("2025-01-01")));
    }

    #[test]
    fn monthly_steps_follow_calendar_rules() {
        let dates = arrange(date("2024-01-31"), 2, &Delta::new().months(1)).unwrap();
        assert_eq!(dates, vec![
            date("2024-01-31"),
            date("2024-03-02"),
            date("2024-04-02"),
        ]);
    }

    #[test]
    fn an_invalid_start_is_refused() {
        assert_eq!(arrange(Instant::invalid(), 5, &Delta::new().days(1)),
                   Err(Error::InvalidStart));
    }
}

mod sequencing {
    use super::*;

    #[test]
    fn stops_before_the_end_and_appends_it() {
        let dates = sequence(date("2024-12-27"), date("2024-12-30"), &Delta::new().days(1)).unwrap();
        assert_eq!(dates, vec![
            date("2024-12-27"),
            date("2024-12-28"),
            date("2024-12-29"),
            date("2024-12-30"),
        ]);
    }

    #[test]
    fn a_short_final_step() {
        let dates = sequence(date("2024-12-27"), date("2024-12-29T06:00:00"), &Delta::new().days(1)).unwrap();
        assert_eq!(dates.last(), Some(&date("2024-12-29T06:00:00")));
        assert_eq!(dates.len(), 4);
    }

    #[test]
    fn the_end_can_duplicate_the_last_step() {
        // 12-29 is generated (it’s strictly before the end of day), and the
        // end is appended regardless, closer than one whole step.
        let dates = sequence(date("2024-12-27"), date("2024-12-29T00:00:00.001"), &Delta::new().days(1)).unwrap();
        assert_eq!(&dates[2..], &[ date("2024-12-29"), date("2024-12-29T00:00:00.001") ]);
    }

    #[test]
    fn boundaries_must_be_valid() {
        let delta = Delta::new().days(1);
        assert_eq!(sequence(Instant::invalid(), date("2025-01-01"), &delta), Err(Error::InvalidStart));
        assert_eq!(sequence(date("2025-01-01"), Instant::invalid(), &delta), Err(Error::InvalidEnd));
    }

    #[test]
    fn error_messages_name_the_boundary() {
        assert_eq!(Error::InvalidStart.to_string(), "sequence start is not a valid instant");
        assert_eq!(Error::InvalidEnd.to_string(), "sequence end is not a valid instant");
    }
}

mod stepping {
    use super::*;

    #[test]
    fn endless_until_taken() {
        let quarters: Vec<_> = steps(date("2024-01-01"), Delta::new().months(3)).take(5).collect();
        assert_eq!(quarters, vec![
            date("2024-01-01"),
            date("2024-04-01"),
            date("2024-07-01"),
            date("2024-10-01"),
            date("2025-01-01"),
        ]);
    }
}
