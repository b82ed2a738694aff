//! Slideshow state machine

use rand::Rng;
use serde::Serialize;

/// Direction of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Everything that can drive the slideshow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Forward control or right arrow
    Next,
    /// Backward control or left arrow
    Previous,
    /// The auto-advance timer fired
    Tick,
    /// Escape, leave the slideshow
    Exit,
}

impl Input {
    /// Map a client message or keyboard key name to an input
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "next" | "ArrowRight" => Some(Input::Next),
            "prev" | "previous" | "ArrowLeft" => Some(Input::Previous),
            "exit" | "Escape" => Some(Input::Exit),
            _ => None,
        }
    }
}

/// Result of applying an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The cursor moved; the auto-advance countdown restarts
    Moved { index: usize, generation: u64 },
    /// Nothing to show, the input had no visible effect
    Ignored,
    /// Leave the slideshow view
    Exit,
}

/// Cursor over a shuffled image list.
///
/// The order is fixed for the lifetime of the value; `current_index` is
/// always `< len()` when the list is not empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideshowState {
    ordered_images: Vec<String>,
    current_index: usize,
    generation: u64,
}

impl SlideshowState {
    /// Shuffle `images` with the thread-local RNG
    pub fn initialize(images: Vec<String>) -> Self {
        Self::initialize_with_rng(images, &mut rand::thread_rng())
    }

    /// Shuffle `images` with the given RNG
    pub fn initialize_with_rng<R: Rng + ?Sized>(mut images: Vec<String>, rng: &mut R) -> Self {
        shuffle(&mut images, rng);
        Self::from_ordered(images)
    }

    /// Keep `images` in the given order
    pub fn from_ordered(images: Vec<String>) -> Self {
        Self {
            ordered_images: images,
            current_index: 0,
            generation: 0,
        }
    }

    pub fn images(&self) -> &[String] {
        &self.ordered_images
    }

    pub fn len(&self) -> usize {
        self.ordered_images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_images.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Bumped on every move, manual or automatic
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Image under the cursor, `None` for an empty slideshow
    pub fn current(&self) -> Option<&str> {
        self.ordered_images
            .get(self.current_index)
            .map(String::as_str)
    }

    /// Step one image with wraparound, returning the new index.
    ///
    /// The generation is bumped even when the list is empty.
    pub fn advance(&mut self, direction: Direction) -> Option<usize> {
        self.generation += 1;

        let len = self.ordered_images.len();
        if len == 0 {
            return None;
        }

        self.current_index = match direction {
            Direction::Forward => (self.current_index + 1) % len,
            Direction::Backward => (self.current_index + len - 1) % len,
        };
        Some(self.current_index)
    }

    /// The single transition function for every input source
    pub fn apply(&mut self, input: Input) -> Transition {
        let direction = match input {
            Input::Next | Input::Tick => Direction::Forward,
            Input::Previous => Direction::Backward,
            Input::Exit => return Transition::Exit,
        };

        match self.advance(direction) {
            Some(index) => Transition::Moved {
                index,
                generation: self.generation,
            },
            None => Transition::Ignored,
        }
    }
}

/// Fisher-Yates: walk from the last index down, swapping each slot with a
/// uniformly chosen slot at or before it
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn images(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("img-{}.jpg", i)).collect()
    }

    #[test]
    fn test_initialize_is_a_permutation() {
        let input = images(25);
        let mut rng = StdRng::seed_from_u64(7);
        let state = SlideshowState::initialize_with_rng(input.clone(), &mut rng);

        assert_eq!(state.len(), input.len());
        let mut shuffled = state.images().to_vec();
        shuffled.sort();
        let mut expected = input;
        expected.sort();
        assert_eq!(shuffled, expected);
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.generation(), 0);
    }

    #[test]
    fn test_initialize_keeps_duplicates() {
        let input = vec!["a".to_string(), "a".to_string(), "b".to_string()];
        let state = SlideshowState::initialize(input);
        let count_a = state.images().iter().filter(|i| *i == "a").count();
        assert_eq!(count_a, 2);
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn test_shuffle_reaches_every_position() {
        // With enough seeds every element should land in the first slot
        let mut seen = [false; 4];
        for seed in 0..200 {
            let mut items = [0usize, 1, 2, 3];
            shuffle(&mut items, &mut StdRng::seed_from_u64(seed));
            seen[items[0]] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_forward_wraps_to_start() {
        let mut state = SlideshowState::from_ordered(images(3));
        state.advance(Direction::Forward);
        state.advance(Direction::Forward);
        assert_eq!(state.current_index(), 2);
        assert_eq!(state.advance(Direction::Forward), Some(0));
    }

    #[test]
    fn test_backward_wraps_to_end() {
        let mut state = SlideshowState::from_ordered(images(3));
        assert_eq!(state.advance(Direction::Backward), Some(2));
        assert_eq!(state.current(), Some("img-2.jpg"));
    }

    #[test]
    fn test_every_advance_bumps_generation_once() {
        let mut state = SlideshowState::from_ordered(images(2));
        let inputs = [Input::Next, Input::Tick, Input::Previous, Input::Previous];
        for (i, input) in inputs.into_iter().enumerate() {
            state.apply(input);
            assert_eq!(state.generation(), i as u64 + 1);
        }
    }

    #[test]
    fn test_single_image_stays_put() {
        let mut state = SlideshowState::from_ordered(images(1));
        assert_eq!(
            state.apply(Input::Next),
            Transition::Moved {
                index: 0,
                generation: 1
            }
        );
        assert_eq!(state.apply(Input::Previous), Transition::Moved { index: 0, generation: 2 });
    }

    #[test]
    fn test_empty_slideshow_is_safe() {
        let mut state = SlideshowState::initialize(Vec::new());
        assert!(state.is_empty());
        assert_eq!(state.current(), None);

        assert_eq!(state.advance(Direction::Forward), None);
        assert_eq!(state.advance(Direction::Backward), None);
        assert_eq!(state.apply(Input::Tick), Transition::Ignored);
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.generation(), 3);
    }

    #[test]
    fn test_exit_leaves_state_untouched() {
        let mut state = SlideshowState::from_ordered(images(3));
        assert_eq!(state.apply(Input::Exit), Transition::Exit);
        assert_eq!(state.generation(), 0);
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Input::from_key("ArrowRight"), Some(Input::Next));
        assert_eq!(Input::from_key("ArrowLeft"), Some(Input::Previous));
        assert_eq!(Input::from_key("Escape"), Some(Input::Exit));
        assert_eq!(Input::from_key("Enter"), None);
    }
}
