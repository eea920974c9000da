// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod error;
pub mod locks;
pub mod process_certification_application;
pub mod recommendations;
pub mod repository_factory;
pub mod review_certification_application;
pub mod submit_certification_application;

// Re-export use cases for convenience
pub use error::CertificationUseCaseError;
pub use locks::ApplicationLocks;
pub use process_certification_application::{
    ProcessCertificationApplicationUseCase, ProcessCertificationRequest, ProcessCertificationResponse,
    ProcessCertificationSettings, StandardProcessCertificationApplicationUseCase,
};
pub use review_certification_application::{ReviewCertificationApplicationUseCase, StandardReviewCertificationApplicationUseCase};
pub use submit_certification_application::{
    StandardSubmitCertificationApplicationUseCase, SubmitCertificationApplicationUseCase, SubmitCertificationRequest,
};
