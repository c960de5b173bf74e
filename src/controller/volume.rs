//! Step and slider volume controls

use super::PlayerBar;

const MAX_VOLUME: u8 = 100;

/// 0 and 100 stay local; only values strictly inside the range are pushed
pub(super) fn is_pushable(volume: u8) -> bool {
    volume > 0 && volume < MAX_VOLUME
}

impl PlayerBar {
    pub async fn volume_up(&self) {
        let mut volume = self.volume.lock().await;
        if *volume >= MAX_VOLUME {
            return;
        }
        let next = volume.saturating_add(self.volume_step).min(MAX_VOLUME);
        self.apply_volume(&mut volume, next);
    }

    pub async fn volume_down(&self) {
        let mut volume = self.volume.lock().await;
        if *volume == 0 {
            return;
        }
        let next = volume.saturating_sub(self.volume_step);
        self.apply_volume(&mut volume, next);
    }

    /// Slider input; anything above 100 is clamped
    pub async fn set_volume(&self, value: u8) {
        let mut volume = self.volume.lock().await;
        self.apply_volume(&mut volume, value.min(MAX_VOLUME));
    }

    pub async fn nudge_volume(&self, delta: i8) {
        let mut volume = self.volume.lock().await;
        let next = (i16::from(*volume) + i16::from(delta)).clamp(0, i16::from(MAX_VOLUME)) as u8;
        self.apply_volume(&mut volume, next);
    }

    fn apply_volume(&self, current: &mut u8, next: u8) {
        if *current == next {
            return;
        }
        *current = next;

        if is_pushable(next) {
            self.volume_push.call(next);
        } else {
            tracing::debug!(volume = next, "Volume at bound, not pushed");
        }
    }
}
