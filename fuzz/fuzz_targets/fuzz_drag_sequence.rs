#![no_main]

use libfuzzer_sys::fuzz_target;
use springsize_runtime::{
    CaptureError, Direction, FrameHost, FrameToken, ListenerId, PointerCapture, PointerId,
    PointerListeners, ResizeConfig, ResizeEngine, SchedulerState,
};

#[derive(Default)]
struct NullHost {
    next: u64,
    reject: bool,
}

impl FrameHost for NullHost {
    fn request_frame(&mut self) -> FrameToken {
        self.next += 1;
        FrameToken(self.next)
    }

    fn cancel_frame(&mut self, _: FrameToken) {}
}

impl PointerCapture for NullHost {
    fn capture_pointer(&mut self, id: PointerId) -> Result<(), CaptureError> {
        if self.reject {
            Err(CaptureError::AlreadyCaptured(id))
        } else {
            Ok(())
        }
    }

    fn release_pointer(&mut self, _: PointerId) -> Result<(), CaptureError> {
        Ok(())
    }
}

impl PointerListeners for NullHost {
    fn listen_pointer_moves(&mut self) -> ListenerId {
        ListenerId(1)
    }

    fn unlisten_pointer_moves(&mut self, _: ListenerId) {}
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let host = NullHost {
        reject: data[0] & 1 == 1,
        ..NullHost::default()
    };
    let Ok(mut engine) = ResizeEngine::new(ResizeConfig::default(), host) else {
        return;
    };
    let mut clock = 0.0;

    // Each 3-byte chunk is one event: opcode, then two signed coordinates.
    for chunk in data[1..].chunks_exact(3) {
        let x = f64::from(chunk[1] as i8) * 4.0;
        let y = f64::from(chunk[2] as i8) * 4.0;
        match chunk[0] % 4 {
            0 => {
                let direction = Direction::ALL[(chunk[0] / 4) as usize % 8];
                engine.pointer_down(direction, u32::from(chunk[0]), x, y);
            }
            1 => {
                engine.pointer_move(x, y);
            }
            2 => {
                engine.pointer_up(u32::from(chunk[0]));
            }
            _ => {
                if let SchedulerState::Running { token, .. } = engine.scheduler_state() {
                    clock += f64::from(chunk[1]);
                    engine.on_frame(token, clock);
                }
            }
        }
        let dims = engine.dimensions();
        assert!(dims.width.is_finite() && dims.height.is_finite());
        assert_eq!(dims.is_dragging, engine.is_dragging());
    }
    engine.shutdown();
});
