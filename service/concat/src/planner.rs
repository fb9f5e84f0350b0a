use domain_concat::model::vo::{ByteRange, PartPlan, PartSegment, SourceMeta, MIN_PART_SIZE};

/// Plan upload parts for the ordered sources.
///
/// Greedy single pass: sources too small to stand alone accumulate into a
/// pending buffered part; the source that crosses the threshold lends the
/// pending part exactly the bytes it still needs, and its remainder is
/// reconsidered from scratch. Every emitted part except the final one covers
/// at least [`MIN_PART_SIZE`] bytes, and the parts cover every byte of every
/// source in order.
pub fn plan_parts(sources: &[SourceMeta]) -> Vec<PartPlan> {
    let mut plans = vec![];
    let mut pending: Vec<PartSegment> = vec![];
    let mut pending_size = 0u64;

    for source in sources {
        let size = source.size;
        let mut offset = 0u64;
        loop {
            let remaining = size - offset;
            if offset > 0 && remaining == 0 {
                // A buffered part closed exactly at this source's end.
                break;
            }
            if pending_size + remaining < MIN_PART_SIZE {
                pending.push(PartSegment {
                    source: source.url.clone(),
                    range: tail_range(offset, size),
                });
                pending_size += remaining;
                break;
            }
            if pending.is_empty() {
                // The remainder alone clears the threshold: one copy part.
                plans.push(PartPlan::Copy {
                    source: source.url.clone(),
                    range: tail_range(offset, size),
                });
                break;
            }
            // Lend the pending part just enough bytes to close it out.
            let diff = MIN_PART_SIZE - pending_size;
            pending.push(PartSegment {
                source: source.url.clone(),
                range: Some(ByteRange::new(offset, offset + diff - 1)),
            });
            plans.push(PartPlan::Buffer {
                segments: std::mem::take(&mut pending),
            });
            pending_size = 0;
            offset += diff;
        }
    }

    if !pending.is_empty() {
        // The final part is exempt from the minimum-size rule.
        plans.push(PartPlan::Buffer { segments: pending });
    }
    plans
}

/// Range for the tail of a source; `None` when the tail is the whole object.
fn tail_range(offset: u64, size: u64) -> Option<ByteRange> {
    (offset > 0).then(|| ByteRange::new(offset, size - 1))
}
