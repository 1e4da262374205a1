//! Solidity bindings for the experience registry and the profile hub

use alloy_sol_types::sol;

sol! {
    /// Registry of experiences, their join requests and participants
    interface INomadExperience {
        function experienceCount() external view returns (uint256 count);

        function getExperience(uint256 experienceId) external view returns (
            address creator,
            string title,
            string description,
            string coverImage,
            uint256 startTime,
            uint256 endTime,
            string location,
            uint256 price,
            uint256 maxParticipants,
            bool canceled,
            uint256 participantCount
        );

        function getJoinRequests(uint256 experienceId) external view returns (address[] requests);

        function getParticipants(uint256 experienceId) external view returns (address[] participants);

        function getUserApprovedExperiences(address user) external view returns (uint256[] ids);

        function getUserRequestedExperiences(address user) external view returns (uint256[] ids);

        function createExperience(
            string title,
            string description,
            string coverImage,
            uint256 startTime,
            uint256 endTime,
            string location,
            uint256 price,
            uint256 maxParticipants
        ) external returns (uint256 experienceId);
    }

    /// Per-user hosting and attendance counters
    interface INomaProfileHub {
        struct Profile {
            bool exists;
            uint256 hostedCount;
            uint256 attendedCount;
            uint256 lastJoinedTimestamp;
            uint256 lastHostedTimestamp;
        }

        function getProfile(address user) external view returns (Profile profile);
    }
}
