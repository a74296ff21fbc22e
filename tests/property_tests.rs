use chrono::{Datelike, NaiveDate};
use employees_db::{parse_full_name, BatchLoader, Employee, EmployeeStore, InMemoryStore};
use proptest::prelude::*;
use proptest::string::string_regex;

fn name_token() -> impl Strategy<Value = String> {
    string_regex("[A-Za-z]{1,12}").unwrap()
}

fn separator() -> impl Strategy<Value = String> {
    string_regex("[ \t]{1,3}").unwrap()
}

// Property: the first two tokens are surname and given name, the rest is the patronymic
proptest! {
    #[test]
    fn prop_full_name_split(
        tokens in prop::collection::vec(name_token(), 2..6),
        sep in separator(),
        pad in separator(),
    ) {
        let input = format!("{}{}{}", pad, tokens.join(&sep), pad);
        let name = parse_full_name(&input).unwrap();

        prop_assert_eq!(&name.surname, &tokens[0]);
        prop_assert_eq!(&name.given_name, &tokens[1]);
        prop_assert_eq!(name.patronymic, tokens[2..].join(" "));
    }

    #[test]
    fn prop_single_token_rejected(token in name_token(), pad in separator()) {
        let input = format!("{}{}", token, pad);
        prop_assert!(parse_full_name(&input).is_err());
    }
}

// Property: age ticks over exactly on the birthday
proptest! {
    #[test]
    fn prop_age_changes_on_birthday(
        year in 1940i32..2005,
        month in 1u32..=12,
        day in 1u32..=28,
        years in 1i32..80,
    ) {
        let born = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let e = Employee::new("Ivanov", "Petr", "", born, "Male");
        let birthday = born.with_year(year + years).unwrap();

        prop_assert_eq!(e.age_on(birthday), years);
        prop_assert_eq!(e.age_on(birthday.pred_opt().unwrap()), years - 1);
    }
}

// Property: loading the same records twice leaves the store unchanged
proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_load_is_idempotent(
        surnames in prop::collection::vec(name_token(), 0..120),
        batch_size in 1usize..40,
    ) {
        let records: Vec<Employee> = surnames
            .iter()
            .map(|s| Employee::new(s.as_str(), "Anna", "", NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(), "Female"))
            .collect();
        let distinct = surnames.iter().collect::<std::collections::HashSet<_>>().len() as u64;

        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let mut store = InMemoryStore::with_schema();
            let loader = BatchLoader::new(batch_size).unwrap();

            let first = loader.load(&mut store, records.clone(), |_| {}).await.unwrap();
            let second = loader.load(&mut store, records.clone(), |_| {}).await.unwrap();

            let expected_batches = records.len().div_ceil(batch_size) as u64;
            assert_eq!(first.batches, expected_batches);
            assert_eq!(first.inserted, distinct);
            assert_eq!(second.inserted, 0);
            assert_eq!(store.count().await.unwrap(), distinct);
        });
    }
}
