//! Small helpers over year-indexed series.

/// Latest year among `years`.
///
/// Every series in this crate holds unique years, so there is never a tie to
/// break. Both the snapshot builder and the alignment engine go through this.
pub fn latest_observed_year<I>(years: I) -> Option<i32>
where
    I: IntoIterator<Item = i32>,
{
    years.into_iter().max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_of_unordered_years() {
        assert_eq!(latest_observed_year([2012, 2019, 2015]), Some(2019));
        assert_eq!(latest_observed_year(Vec::<i32>::new()), None);
    }
}
