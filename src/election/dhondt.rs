/// A party competing for seats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contender<'a> {
    pub id: &'a str,
    pub votes: f64,
    /// Share of the national vote, percent. Compared against the threshold.
    pub percentage: f64,
}

impl<'a> Contender<'a> {
    /// Build contenders from raw vote counts, taking shares over the total.
    pub fn from_votes(votes: &[(&'a str, f64)]) -> Vec<Contender<'a>> {
        let total: f64 = votes.iter().map(|(_, v)| v).filter(|v| v.is_finite()).sum();
        votes
            .iter()
            .map(|&(id, v)| Contender {
                id,
                votes: v,
                percentage: if total > 0.0 { v / total * 100.0 } else { 0.0 },
            })
            .collect()
    }
}

/// D'Hondt highest-averages apportionment.
///
/// Contenders below `threshold_pct` (or with non-finite votes) take no part.
/// Seats are awarded one at a time to the largest `votes / (seats + 1)`.
/// Equal quotients go to the contender with the lexicographically smaller id,
/// so the result does not depend on input order.
///
/// Returns seats per contender, in input order. With no eligible contender no
/// seat is awarded.
pub fn allocate_seats(
    contenders: &[Contender<'_>],
    total_seats: u32,
    threshold_pct: f64,
) -> Vec<u32> {
    let mut seats = vec![0u32; contenders.len()];
    let eligible: Vec<usize> = contenders
        .iter()
        .enumerate()
        .filter(|(_, c)| c.votes.is_finite() && c.percentage >= threshold_pct)
        .map(|(i, _)| i)
        .collect();

    if eligible.is_empty() {
        tracing::debug!("no contender passed the threshold, no seats awarded");
        return seats;
    }

    for _ in 0..total_seats {
        let mut best: Option<(usize, f64)> = None;
        for &i in &eligible {
            let quotient = contenders[i].votes / (seats[i] as f64 + 1.0);
            best = match best {
                None => Some((i, quotient)),
                Some((j, q)) if beats(quotient, contenders[i].id, q, contenders[j].id) => {
                    Some((i, quotient))
                }
                keep => keep,
            };
        }
        if let Some((winner, _)) = best {
            seats[winner] += 1;
        }
    }

    seats
}

/// Larger quotient wins; equal quotients go to the smaller id.
fn beats(quotient: f64, id: &str, best_quotient: f64, best_id: &str) -> bool {
    quotient > best_quotient || (quotient == best_quotient && id < best_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_allocation() {
        let contenders = Contender::from_votes(&[("A", 100.0), ("B", 80.0), ("C", 30.0)]);
        let seats = allocate_seats(&contenders, 5, 3.0);
        assert_eq!(seats, vec![3, 2, 0]);
        assert_eq!(seats.iter().sum::<u32>(), 5);
        assert!(seats[0] >= *seats.iter().max().unwrap());
    }

    #[test]
    fn test_seats_always_sum_to_total() {
        let contenders = Contender::from_votes(&[
            ("SNS", 1_050_000.0),
            ("SSP", 410_000.0),
            ("SPS", 330_000.0),
            ("DS", 270_000.0),
            ("SRS", 170_000.0),
            ("PSG", 220_000.0),
            ("Others", 60_000.0),
        ]);
        for total in [1, 7, 100, 250, 251] {
            let seats = allocate_seats(&contenders, total, 3.0);
            assert_eq!(seats.iter().sum::<u32>(), total);
        }
    }

    #[test]
    fn test_threshold_excludes() {
        let contenders = Contender::from_votes(&[("A", 980.0), ("B", 20.0)]);
        let seats = allocate_seats(&contenders, 10, 3.0);
        assert_eq!(seats, vec![10, 0]);
    }

    #[test]
    fn test_no_eligible_contenders() {
        let contenders = Contender::from_votes(&[("A", 10.0), ("B", 10.0)]);
        assert_eq!(allocate_seats(&contenders, 5, 60.0), vec![0, 0]);
        assert!(allocate_seats(&[], 5, 3.0).is_empty());
    }

    #[test]
    fn test_tie_goes_to_smaller_id_regardless_of_order() {
        let forward = Contender::from_votes(&[("alpha", 50.0), ("beta", 50.0)]);
        let backward = Contender::from_votes(&[("beta", 50.0), ("alpha", 50.0)]);
        assert_eq!(allocate_seats(&forward, 1, 3.0), vec![1, 0]);
        assert_eq!(allocate_seats(&backward, 1, 3.0), vec![0, 1]);
    }

    #[test]
    fn test_largest_party_never_behind() {
        let contenders = Contender::from_votes(&[("x", 31.0), ("y", 33.0), ("z", 36.0)]);
        let seats = allocate_seats(&contenders, 17, 3.0);
        assert!(seats[2] >= seats[1] && seats[1] >= seats[0]);
    }
}
