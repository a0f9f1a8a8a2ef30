/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Tick source with a fixed timestep
/// Yields `limit` frames, or runs forever when `limit` is `None`
#[derive(Debug, Clone)]
pub struct FixedFrames {
    delta: f32,
    frame_number: u64,
    limit: Option<u64>,
}

impl FixedFrames {
    pub fn new(delta: f32, limit: Option<u64>) -> Self {
        Self {
            delta: delta.max(0.0),
            frame_number: 0,
            limit,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }
}

impl Iterator for FixedFrames {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        if self.limit.is_some_and(|limit| self.frame_number >= limit) {
            return None;
        }

        self.frame_number += 1;
        let time = self.frame_number as f32 * self.delta;
        Some(FrameInfo::new(self.frame_number, time, self.delta))
    }
}
