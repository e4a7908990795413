//! Pi digit store: an authentic 1000-digit seed that can be grown on
//! demand with pseudo-random filler, up to a fixed cap.
//!
//! Growth simulates a slow fetch: a fixed delay regardless of how many
//! digits are requested. Digits past the authentic prefix are uniform
//! filler, not mathematically valid Pi digits.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::Rng;
use tokio::sync::watch;

/// First 1000 digits of Pi: '3' followed by the 999 digits after the
/// decimal point. The point itself is not part of the sequence.
const PI_PREFIX: &str = "3141592653589793238462643383279502884197169399375105820974944592307816406286208998628034825342117067982148086513282306647093844609550582231725359408128481117450284102701938521105559644622948954930381964428810975665933446128475648233786783165271201909145648566923460348610454326648213393607260249141273724587006606315588174881520920962829254091715364367892590360011330530548820466521384146951941511609433057270365759591953092186117381932611793105118548074462379962749567351885752724891227938183011949129833673362440656643086021394946395224737190702179860943702770539217176293176752384674818467669405132000568127145263560827785771342757789609173637178721468440901224953430146549585371050792279689258923542019956112129021960864034418159813629774771309960518707211349999998372978049951059731732816096318595024459455346908302642522308253344685035261931188171010003137838752886587533208381420617177669147303598253490428755468731159562863882353787593751957781857780532171226806613001927876611195909216420198";

/// Hard cap on the digit sequence; grow targets clamp to this.
pub const MAX_DIGITS: usize = 5000;

const GROW_DELAY_MS: u64 = 1500;

/// Immutable point-in-time copy of the digit sequence. A snapshot taken
/// before a grow never observes the new digits.
#[derive(Clone)]
pub struct DigitSnapshot(Arc<[u8]>);

impl DigitSnapshot {
    pub fn empty() -> Self {
        DigitSnapshot(Vec::new().into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn digit(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<u8>> for DigitSnapshot {
    fn from(digits: Vec<u8>) -> Self {
        DigitSnapshot(digits.into())
    }
}

struct DigitState {
    digits: Vec<u8>,
    growing: bool,
}

/// Cloneable handle to the shared digit sequence.
#[derive(Clone)]
pub struct DigitStore {
    state: Arc<Mutex<DigitState>>,
    grown: Arc<watch::Sender<usize>>,
}

impl DigitStore {
    pub fn new() -> Self {
        let (grown, _) = watch::channel(0);
        DigitStore {
            state: Arc::new(Mutex::new(DigitState {
                digits: Vec::new(),
                growing: false,
            })),
            grown: Arc::new(grown),
        }
    }

    /// Seed the sequence with the authentic prefix. First call only; a
    /// repeat call leaves the sequence alone and returns the current count.
    /// Must not be called concurrently with `grow`.
    pub fn initialize(&self) -> usize {
        let mut state = self.state.lock().unwrap();
        if !state.digits.is_empty() {
            log::warn!("digit store already initialized");
            return state.digits.len();
        }
        state.digits = PI_PREFIX.bytes().map(|b| b - b'0').collect();
        log::info!("seeded {} authentic pi digits", state.digits.len());
        state.digits.len()
    }

    /// Extend the sequence with filler digits until it holds
    /// `min(target, MAX_DIGITS)` values, after a fixed simulated latency.
    ///
    /// A call while another grow is in flight starts no second timer: it
    /// waits for the in-flight grow and reports the same final count. A
    /// target at or below the current count resolves immediately.
    pub async fn grow(&self, target: usize) -> usize {
        let target = target.min(MAX_DIGITS);
        let in_flight = {
            let mut state = self.state.lock().unwrap();
            if state.growing {
                Some(self.grown.subscribe())
            } else if target <= state.digits.len() {
                return state.digits.len();
            } else {
                state.growing = true;
                None
            }
        };

        if let Some(mut done) = in_flight {
            let _ = done.changed().await;
            return self.count();
        }

        // Fixed delay standing in for a real fetch; independent of volume.
        tokio::time::sleep(Duration::from_millis(GROW_DELAY_MS)).await;

        let count = {
            let mut state = self.state.lock().unwrap();
            let mut rng = rand::thread_rng();
            while state.digits.len() < target {
                state.digits.push(rng.gen_range(0..10));
            }
            state.growing = false;
            state.digits.len()
        };
        log::info!("grew digit sequence to {count}");
        let _ = self.grown.send(count);
        count
    }

    pub fn digit_at(&self, index: usize) -> Option<u8> {
        self.state.lock().unwrap().digits.get(index).copied()
    }

    pub fn digits_in_range(&self, start: usize, count: usize) -> Vec<u8> {
        let state = self.state.lock().unwrap();
        let end = (start + count).min(state.digits.len());
        if start >= end {
            return Vec::new();
        }
        state.digits[start..end].to_vec()
    }

    pub fn snapshot(&self) -> DigitSnapshot {
        DigitSnapshot::from(self.state.lock().unwrap().digits.clone())
    }

    pub fn count(&self) -> usize {
        self.state.lock().unwrap().digits.len()
    }

    pub fn is_growing(&self) -> bool {
        self.state.lock().unwrap().growing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_the_authentic_prefix() {
        let store = DigitStore::new();
        assert_eq!(store.initialize(), 1000);
        assert_eq!(store.count(), 1000);
        assert_eq!(store.digit_at(0), Some(3));
        assert_eq!(store.digit_at(1), Some(1));
        assert_eq!(store.digit_at(2), Some(4));
        assert_eq!(store.digit_at(3), Some(1));
        assert_eq!(store.digit_at(4), Some(5));
        assert_eq!(store.digit_at(1000), None);
    }

    #[test]
    fn initialize_twice_is_harmless() {
        let store = DigitStore::new();
        store.initialize();
        assert_eq!(store.initialize(), 1000);
        assert_eq!(store.count(), 1000);
    }

    #[test]
    fn range_access_clamps() {
        let store = DigitStore::new();
        store.initialize();
        assert_eq!(store.digits_in_range(0, 5), vec![3, 1, 4, 1, 5]);
        assert_eq!(store.digits_in_range(998, 10).len(), 2);
        assert!(store.digits_in_range(2000, 10).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn grow_extends_and_clamps() {
        let store = DigitStore::new();
        let before = store.initialize();
        assert_eq!(store.grow(2000).await, 2000);
        assert_eq!(store.count(), 2000.max(before));
        // Target below the current count is a no-op.
        assert_eq!(store.grow(1500).await, 2000);
        // Targets above the cap are requests for exactly the cap.
        assert_eq!(store.grow(90_000).await, MAX_DIGITS);
        assert_eq!(store.count(), MAX_DIGITS);
        // Authentic digits never change across growth.
        assert_eq!(store.digit_at(0), Some(3));
        assert!(store.digits_in_range(0, MAX_DIGITS).iter().all(|&d| d < 10));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_grows_coalesce() {
        let store = DigitStore::new();
        store.initialize();
        let (a, b) = tokio::join!(store.grow(3000), store.grow(3000));
        assert_eq!(a, 3000);
        assert_eq!(b, 3000);
        assert_eq!(store.count(), 3000);
        assert!(!store.is_growing());
    }

    #[tokio::test(start_paused = true)]
    async fn snapshots_never_observe_growth() {
        let store = DigitStore::new();
        store.initialize();
        let snapshot = store.snapshot();
        store.grow(1200).await;
        assert_eq!(snapshot.len(), 1000);
        assert_eq!(store.snapshot().len(), 1200);
        assert_eq!(snapshot.digit(1000), None);
    }
}
