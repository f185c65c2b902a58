//! Hand pose as seen by the gesture loop.

use handcue_core::Point;
use serde::Deserialize;

/// What the loop needs from one detected hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandPose {
    /// All four fingers curled.
    pub fist: bool,
    /// Index fingertip in frame pixels, if the detector located it.
    pub fingertip: Option<Point>,
}

/// Normalized image coordinate, `0.0..=1.0` on both axes, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "LandmarkRepr")]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LandmarkRepr {
    Xy([f32; 2]),
    Xyz([f32; 3]),
    Named { x: f32, y: f32 },
}

impl From<LandmarkRepr> for Landmark {
    fn from(repr: LandmarkRepr) -> Self {
        match repr {
            LandmarkRepr::Xy([x, y]) | LandmarkRepr::Xyz([x, y, _]) | LandmarkRepr::Named { x, y } => {
                Self { x, y }
            }
        }
    }
}

// 21-point hand model indices.
const INDEX_TIP: usize = 8;
/// (tip, pip) for index, middle, ring, pinky.
const CURL_PAIRS: [(usize, usize); 4] = [(8, 6), (12, 10), (16, 14), (20, 18)];

/// The 21 landmarks of one hand.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct HandLandmarks(pub Vec<Landmark>);

impl HandLandmarks {
    /// A finger is curled when its tip is not above its middle joint.
    /// Missing landmarks never make a fist.
    pub fn is_fist(&self) -> bool {
        CURL_PAIRS.iter().all(|&(tip, pip)| {
            match (self.0.get(tip), self.0.get(pip)) {
                (Some(tip), Some(pip)) => tip.y >= pip.y,
                _ => false,
            }
        })
    }

    /// Index fingertip scaled to a `width` x `height` frame.
    pub fn fingertip(&self, width: i32, height: i32) -> Option<Point> {
        let tip = self.0.get(INDEX_TIP)?;
        Some(Point::new(
            (tip.x * width as f32) as i32,
            (tip.y * height as f32) as i32,
        ))
    }

    pub fn to_pose(&self, width: i32, height: i32) -> HandPose {
        HandPose {
            fist: self.is_fist(),
            fingertip: self.fingertip(width, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Open hand: every fingertip well above its PIP joint.
    fn open_hand() -> HandLandmarks {
        let mut points = vec![Landmark { x: 0.5, y: 0.8 }; 21];
        for (tip, pip) in CURL_PAIRS {
            points[pip] = Landmark { x: 0.5, y: 0.6 };
            points[tip] = Landmark { x: 0.5, y: 0.4 };
        }
        points[INDEX_TIP] = Landmark { x: 0.25, y: 0.5 };
        HandLandmarks(points)
    }

    fn curl(hand: &mut HandLandmarks, tip: usize, pip: usize) {
        hand.0[tip].y = hand.0[pip].y + 0.05;
    }

    #[test]
    fn open_hand_is_not_fist() {
        assert!(!open_hand().is_fist());
    }

    #[test]
    fn all_fingers_curled_is_fist() {
        let mut hand = open_hand();
        for (tip, pip) in CURL_PAIRS {
            curl(&mut hand, tip, pip);
        }
        assert!(hand.is_fist());
    }

    #[test]
    fn one_extended_finger_breaks_fist() {
        let mut hand = open_hand();
        for (tip, pip) in &CURL_PAIRS[1..] {
            curl(&mut hand, *tip, *pip);
        }
        assert!(!hand.is_fist());
    }

    #[test]
    fn truncated_landmarks_are_not_fist() {
        let mut hand = open_hand();
        for (tip, pip) in CURL_PAIRS {
            curl(&mut hand, tip, pip);
        }
        hand.0.truncate(19);
        assert!(!hand.is_fist());
        assert!(hand.fingertip(640, 480).is_some());
        hand.0.truncate(5);
        assert_eq!(hand.fingertip(640, 480), None);
    }

    #[test]
    fn fingertip_scales_to_frame() {
        assert_eq!(open_hand().fingertip(640, 480), Some(Point::new(160, 240)));
    }

    #[test]
    fn landmark_shapes() {
        let points: Vec<Landmark> =
            serde_json::from_str(r#"[[0.1, 0.2], [0.3, 0.4, -0.01], {"x": 0.5, "y": 0.6, "z": 0}]"#).unwrap();
        assert_eq!(points[0], Landmark { x: 0.1, y: 0.2 });
        assert_eq!(points[1], Landmark { x: 0.3, y: 0.4 });
        assert_eq!(points[2], Landmark { x: 0.5, y: 0.6 });
    }
}
