use super::types::{End, EndFilter, LineAccessor};

/// Where two lines touch: `first` is the end on the line the check started
/// from, `second` the end on the other line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub first: End,
    pub second: End,
}

impl Contact {
    fn swapped(self) -> Contact {
        Contact {
            first: self.second,
            second: self.first,
        }
    }
}

const ENDS: [End; 2] = [End::EndA, End::EndB];

/// Resolve which end of `target` a connection point lies on.
///
/// `z_relative_to` names the end of `target` the recorded position is measured
/// from; the point is taken to be at whichever nominal end it is closer to.
pub fn touching_end<L: LineAccessor + ?Sized>(target: &L, z_relative_to: End, position: f64) -> End {
    let half = target.total_length() / 2.0;
    match z_relative_to {
        End::EndA if position < half => End::EndA,
        End::EndB if position > half => End::EndA,
        _ => End::EndB,
    }
}

/// `l1` references `l2` by name at one of the ends allowed by `filter`.
fn direct<A, B>(l1: &A, l2: &B, filter: EndFilter) -> Option<Contact>
where
    A: LineAccessor + ?Sized,
    B: LineAccessor + ?Sized,
{
    ENDS.iter().copied().filter(|e| filter.allows(*e)).find_map(|end| {
        let ep = l1.endpoint(end);
        if ep.connection.refers_to(l2.name()) {
            Some(Contact {
                first: end,
                second: touching_end(l2, ep.z_relative_to, ep.position_along_line_axis),
            })
        } else {
            None
        }
    })
}

/// `l2` references `l1` by name and lands on an end of `l1` allowed by `filter`.
fn reverse<A, B>(l1: &A, l2: &B, filter: EndFilter) -> Option<Contact>
where
    A: LineAccessor + ?Sized,
    B: LineAccessor + ?Sized,
{
    ENDS.iter().copied().find_map(|end| {
        direct(l2, l1, EndFilter::Only(end))
            .map(Contact::swapped)
            .filter(|c| filter.allows(c.first))
    })
}

/// Both lines hang off the same third-party object (vessel, buoy, ...).
fn shared<A, B>(l1: &A, l2: &B, filter: EndFilter) -> Option<Contact>
where
    A: LineAccessor + ?Sized,
    B: LineAccessor + ?Sized,
{
    for end1 in ENDS.iter().copied().filter(|e| filter.allows(*e)) {
        let c1 = &l1.endpoint(end1).connection;
        if !c1.is_object() {
            continue;
        }
        for end2 in ENDS {
            if l2.endpoint(end2).connection == *c1 {
                return Some(Contact { first: end1, second: end2 });
            }
        }
    }
    None
}

/// Whether `l1` and `l2` are interconnected, directly or through a common object.
///
/// Direct references from `l1` win over references from `l2`, which win over a
/// shared external object. Only the first matching case is reported.
pub fn connection<A, B>(l1: &A, l2: &B, filter: EndFilter) -> Option<Contact>
where
    A: LineAccessor + ?Sized,
    B: LineAccessor + ?Sized,
{
    direct(l1, l2, filter)
        .or_else(|| reverse(l1, l2, filter))
        .or_else(|| shared(l1, l2, filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::lines::types::{Connection, Line, LineEndpoint};

    fn line(name: &str, len: f64, a: LineEndpoint, b: LineEndpoint) -> Line {
        Line::new(name, len, a, b)
    }

    #[test]
    fn touching_end_follows_half_length_rule() {
        let l = line("L", 100.0, LineEndpoint::free(), LineEndpoint::free());
        assert_eq!(touching_end(&l, End::EndA, 10.0), End::EndA);
        assert_eq!(touching_end(&l, End::EndA, 90.0), End::EndB);
        assert_eq!(touching_end(&l, End::EndB, 90.0), End::EndA);
        assert_eq!(touching_end(&l, End::EndB, 10.0), End::EndB);
        // exactly half way is never "closer" to either nominal end
        assert_eq!(touching_end(&l, End::EndA, 50.0), End::EndB);
        assert_eq!(touching_end(&l, End::EndB, 50.0), End::EndB);
    }

    #[test]
    fn direct_connection_resolves_far_end() {
        let upper = line("Upper", 100.0, LineEndpoint::new("Vessel", 0.0, End::EndA), LineEndpoint::free());
        let lower = line("Lower", 50.0, LineEndpoint::new("Upper", 100.0, End::EndA), LineEndpoint::new(Connection::Anchored, 0.0, End::EndA));

        let c = connection(&lower, &upper, EndFilter::Both).unwrap();
        assert_eq!(c, Contact { first: End::EndA, second: End::EndB });

        // seen from the other side the contact is mirrored
        let c = connection(&upper, &lower, EndFilter::Both).unwrap();
        assert_eq!(c, Contact { first: End::EndB, second: End::EndA });
    }

    #[test]
    fn end_filter_restricts_reverse_check() {
        let upper = line("Upper", 100.0, LineEndpoint::free(), LineEndpoint::free());
        let lower = line("Lower", 50.0, LineEndpoint::new("Upper", 100.0, End::EndA), LineEndpoint::free());

        assert!(connection(&upper, &lower, EndFilter::Only(End::EndB)).is_some());
        assert!(connection(&upper, &lower, EndFilter::Only(End::EndA)).is_none());
    }

    #[test]
    fn shared_object_counts_as_connection() {
        let a = line("A", 10.0, LineEndpoint::new("Buoy", 0.0, End::EndA), LineEndpoint::free());
        let b = line("B", 10.0, LineEndpoint::free(), LineEndpoint::new("Buoy", 0.0, End::EndA));
        let c = connection(&a, &b, EndFilter::Both).unwrap();
        assert_eq!(c, Contact { first: End::EndA, second: End::EndB });
    }

    #[test]
    fn sentinels_never_connect() {
        let a = line("A", 10.0, LineEndpoint::free(), LineEndpoint::new(Connection::Anchored, 0.0, End::EndA));
        let b = line("B", 10.0, LineEndpoint::free(), LineEndpoint::new(Connection::Anchored, 0.0, End::EndA));
        assert!(connection(&a, &b, EndFilter::Both).is_none());
    }
}
