//! Requests from other contexts
//!
//! Network handlers, buttons and interrupt handlers never touch the clock
//! directly. They queue a [`ClockIntent`]; the clock drains the queue at the
//! start of its next tick, so every state change happens on the render loop.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::animation::AnimationId;
use crate::color::Rgb;
use crate::display::ColorTarget;

/// A change requested from outside the render loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockIntent {
    /// Play an animation once
    Play(AnimationId),
    /// Play an animation until finished or stopped
    Loop(AnimationId),
    /// Let a looping animation end after its current pass
    Finish(AnimationId),
    Stop(AnimationId),
    DisplayTime { hours: u8, minutes: u8 },
    /// Count up from zero to the given time
    CountUp { hours: u8, minutes: u8 },
    DisplayDigit { display: u8, value: u8 },
    BlankDisplay(u8),
    SetColor { target: ColorTarget, color: Rgb },
    SetBrightness { level: u8, immediately: bool },
    /// Start a progress bar for `total` units of work
    StartProgress { total: u32 },
    UpdateProgress { done: u32 },
    TurnAllSegmentsOff,
    TurnAllOff,
}

/// Returned when the queue is full; carries the rejected intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError(pub ClockIntent);

/// Bounded queue of intents, safe to share with interrupt handlers
pub struct IntentQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<ClockIntent, SIZE>>>,
}

impl<const SIZE: usize> IntentQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn sender(&self) -> IntentSender<'_, SIZE> {
        IntentSender { queue: self }
    }

    pub const fn receiver(&self) -> IntentReceiver<'_, SIZE> {
        IntentReceiver { queue: self }
    }

    pub fn try_send(&self, intent: ClockIntent) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .borrow_mut()
                .push_back(intent)
                .map_err(TrySendError)
        })
    }

    pub fn try_receive(&self) -> Option<ClockIntent> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for IntentQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for queueing intents
#[derive(Clone, Copy)]
pub struct IntentSender<'a, const SIZE: usize> {
    queue: &'a IntentQueue<SIZE>,
}

impl<const SIZE: usize> IntentSender<'_, SIZE> {
    /// Queue an intent, handing it back if the queue is full
    pub fn try_send(&self, intent: ClockIntent) -> Result<(), TrySendError> {
        self.queue.try_send(intent)
    }
}

/// Handle for draining intents on the render loop
#[derive(Clone, Copy)]
pub struct IntentReceiver<'a, const SIZE: usize> {
    queue: &'a IntentQueue<SIZE>,
}

impl<const SIZE: usize> IntentReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Option<ClockIntent> {
        self.queue.try_receive()
    }

    /// Take every queued intent, oldest first
    pub fn drain(&self) -> impl Iterator<Item = ClockIntent> + '_ {
        core::iter::from_fn(move || self.try_receive())
    }
}
