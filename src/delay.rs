use std::thread::sleep;
use std::time::Duration;

/// Pause between pin transitions.
pub trait Delay {
    fn delay(&mut self, period: Duration);
}

impl<T: Delay + ?Sized> Delay for &mut T {
    fn delay(&mut self, period: Duration) {
        (**self).delay(period)
    }
}

/// Blocks the calling thread. Not interruptible.
#[derive(Debug, Default)]
pub struct ThreadSleep;

impl Delay for ThreadSleep {
    fn delay(&mut self, period: Duration) {
        sleep(period);
    }
}
