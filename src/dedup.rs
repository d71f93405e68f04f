/// Duplicate packet detection by BTHome packet id
///
/// Overlapping scan reports deliver the same advertisement more than once.
/// Each address keeps the last accepted packet id; a repeat of that id is a
/// duplicate. The table holds at most `capacity` addresses and forgets the
/// one that was updated longest ago when a new address arrives.
use bluer::Address;
use log::trace;
use std::collections::{HashMap, VecDeque};

#[derive(Debug)]
pub struct SequenceGate {
    last_ids: HashMap<Address, u8>,
    // Oldest update at the front
    order: VecDeque<Address>,
    capacity: usize,
}

impl SequenceGate {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            last_ids: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns false if `packet_id` repeats the last accepted id for `address`
    ///
    /// Packets without an id always pass and leave the table untouched.
    pub fn admit(&mut self, address: Address, packet_id: Option<u8>) -> bool {
        let Some(packet_id) = packet_id else {
            return true;
        };

        match self.last_ids.get(&address) {
            Some(&last) if last == packet_id => return false,
            Some(_) => self.order.retain(|a| *a != address),
            None => {
                if self.last_ids.len() >= self.capacity {
                    if let Some(oldest) = self.order.pop_front() {
                        trace!("Forgetting packet id of {}", oldest);
                        self.last_ids.remove(&oldest);
                    }
                }
            }
        }

        self.last_ids.insert(address, packet_id);
        self.order.push_back(address);
        true
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.last_ids.len()
    }
}
